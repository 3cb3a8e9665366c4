//! Byte-for-byte file comparison.

use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

use crate::core::errors::{IoResultExt, Result};

const CHUNK_SIZE: usize = 64 * 1024;

/// True when both files hold exactly the same bytes.
///
/// Sizes are compared first; contents are streamed in chunks.
pub fn files_identical(left: &Path, right: &Path) -> Result<bool> {
    let left_len = fs::metadata(left).with_path("Failed to read metadata", left)?.len();
    let right_len = fs::metadata(right).with_path("Failed to read metadata", right)?.len();
    if left_len != right_len {
        return Ok(false);
    }

    let mut left_reader =
        BufReader::new(File::open(left).with_path("Failed to open file", left)?);
    let mut right_reader =
        BufReader::new(File::open(right).with_path("Failed to open file", right)?);

    let mut left_buf = vec![0u8; CHUNK_SIZE];
    let mut right_buf = vec![0u8; CHUNK_SIZE];

    loop {
        let n = read_full(&mut left_reader, &mut left_buf).with_path("Failed to read file", left)?;
        let m =
            read_full(&mut right_reader, &mut right_buf).with_path("Failed to read file", right)?;

        if n != m || left_buf[..n] != right_buf[..m] {
            return Ok(false);
        }
        if n == 0 {
            return Ok(true);
        }
    }
}

/// Fill `buf` as far as the reader allows; returns bytes read (0 at EOF).
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
