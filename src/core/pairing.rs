//! Merge-join of two entry lists by base name.
//!
//! Entries from both sides are tagged, sorted together by
//! `(base name, side)` and grouped on equal base names, so each group holds
//! the entries that correspond to each other. Nothing here touches the
//! filesystem; entries only need to expose a path.

use std::collections::VecDeque;
use std::ffi::OsStr;
use std::iter::Peekable;
use std::path::Path;
use std::vec;

use tracing::warn;

/// Which root tree an entry came from. `Left` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    /// First root
    Left,
    /// Second root
    Right,
}

/// One matched entry; at least one side is always present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pair<T> {
    /// Same name exists on both sides
    Both(T, T),
    /// Only the left tree has it
    LeftOnly(T),
    /// Only the right tree has it
    RightOnly(T),
}

impl<T> Pair<T> {
    /// Left entry, if present
    pub fn left(&self) -> Option<&T> {
        match self {
            Self::Both(left, _) | Self::LeftOnly(left) => Some(left),
            Self::RightOnly(_) => None,
        }
    }

    /// Right entry, if present
    pub fn right(&self) -> Option<&T> {
        match self {
            Self::Both(_, right) | Self::RightOnly(right) => Some(right),
            Self::LeftOnly(_) => None,
        }
    }

    /// Split into `(left, right)` options
    pub fn into_parts(self) -> (Option<T>, Option<T>) {
        match self {
            Self::Both(left, right) => (Some(left), Some(right)),
            Self::LeftOnly(left) => (Some(left), None),
            Self::RightOnly(right) => (None, Some(right)),
        }
    }

    /// Rebuild from options; `None` when both are absent
    pub fn from_parts(left: Option<T>, right: Option<T>) -> Option<Self> {
        match (left, right) {
            (Some(left), Some(right)) => Some(Self::Both(left, right)),
            (Some(left), None) => Some(Self::LeftOnly(left)),
            (None, Some(right)) => Some(Self::RightOnly(right)),
            (None, None) => None,
        }
    }

    /// True when both sides are present
    pub fn is_both(&self) -> bool {
        matches!(self, Self::Both(..))
    }

    /// Apply `f` to every present side
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Pair<U> {
        match self {
            Self::Both(left, right) => Pair::Both(f(left), f(right)),
            Self::LeftOnly(left) => Pair::LeftOnly(f(left)),
            Self::RightOnly(right) => Pair::RightOnly(f(right)),
        }
    }

    /// Borrowing view of the pair
    pub fn as_pair_ref(&self) -> Pair<&T> {
        match self {
            Self::Both(left, right) => Pair::Both(left, right),
            Self::LeftOnly(left) => Pair::LeftOnly(left),
            Self::RightOnly(right) => Pair::RightOnly(right),
        }
    }
}

/// Base name used as the join key. Paths without one (`/`, `..`) use the
/// whole path.
pub fn base_name(path: &Path) -> &OsStr {
    path.file_name().unwrap_or(path.as_os_str())
}

/// Pair up `left` and `right` by base name.
///
/// Pairs come out in ascending name order. The tie-break on equal names is
/// the side tag, then the full path, so the result does not depend on the
/// order of either input.
///
/// A name that appears more than once on one side (possible on case-folding
/// or otherwise unusual filesystems) is still paired totally: left and right
/// entries of the group are zipped in sorted order and the surplus on the
/// longer side comes out one-sided.
pub fn pair<T: AsRef<Path>>(left: Vec<T>, right: Vec<T>) -> Pairs<T> {
    let mut tagged: Vec<(T, Side)> = left
        .into_iter()
        .map(|entry| (entry, Side::Left))
        .chain(right.into_iter().map(|entry| (entry, Side::Right)))
        .collect();

    tagged.sort_by(|(a, side_a), (b, side_b)| {
        let (a, b) = (a.as_ref(), b.as_ref());
        base_name(a)
            .cmp(base_name(b))
            .then(side_a.cmp(side_b))
            .then_with(|| a.cmp(b))
    });

    Pairs {
        entries: tagged.into_iter().peekable(),
        pending: VecDeque::new(),
    }
}

/// Lazy pair sequence returned by [`pair`].
#[derive(Debug)]
pub struct Pairs<T> {
    entries: Peekable<vec::IntoIter<(T, Side)>>,
    pending: VecDeque<Pair<T>>,
}

impl<T: AsRef<Path>> Pairs<T> {
    fn next_group(&mut self) -> Option<Vec<(T, Side)>> {
        let first = self.entries.next()?;
        let mut group = vec![first];

        while let Some((next, _)) = self.entries.peek() {
            if base_name(next.as_ref()) != base_name(group[0].0.as_ref()) {
                break;
            }
            group.extend(self.entries.next());
        }

        Some(group)
    }

    fn resolve_collision(&mut self, group: Vec<(T, Side)>) {
        let name = base_name(group[0].0.as_ref()).to_string_lossy().into_owned();
        let (lefts, rights): (Vec<_>, Vec<_>) =
            group.into_iter().partition(|(_, side)| *side == Side::Left);

        warn!(
            "Name collision on '{}': {} left, {} right entries",
            name,
            lefts.len(),
            rights.len()
        );

        let mut lefts = lefts.into_iter().map(|(entry, _)| entry);
        let mut rights = rights.into_iter().map(|(entry, _)| entry);
        while let Some(pair) = Pair::from_parts(lefts.next(), rights.next()) {
            self.pending.push_back(pair);
        }
    }
}

impl<T: AsRef<Path>> Iterator for Pairs<T> {
    type Item = Pair<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(pair) = self.pending.pop_front() {
            return Some(pair);
        }

        let mut group = self.next_group()?;
        match group.len() {
            1 => {
                let (entry, side) = group.remove(0);
                Some(match side {
                    Side::Left => Pair::LeftOnly(entry),
                    Side::Right => Pair::RightOnly(entry),
                })
            }
            2 if group[0].1 == Side::Left && group[1].1 == Side::Right => {
                let (right, _) = group.remove(1);
                let (left, _) = group.remove(0);
                Some(Pair::Both(left, right))
            }
            _ => {
                self.resolve_collision(group);
                self.pending.pop_front()
            }
        }
    }
}
