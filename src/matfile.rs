//! Parser for the little-endian matrix fixture format used by the
//! conformance tests.
//!
//! Layout: ASCII magic `MAT `, a u32 row count, then per row a u32 element
//! count followed by that many IEEE-754 f64 values. Anything that does not
//! consume the byte stream exactly is rejected.

use alloc::vec::Vec;

use crate::fft::FftError;

const MAGIC: &[u8; 4] = b"MAT ";

fn take<'a>(bytes: &mut &'a [u8], n: usize) -> Result<&'a [u8], FftError> {
    if bytes.len() < n {
        return Err(FftError::CorruptFormat);
    }
    let (head, rest) = bytes.split_at(n);
    *bytes = rest;
    Ok(head)
}

fn read_u32(bytes: &mut &[u8]) -> Result<u32, FftError> {
    let raw = take(bytes, 4)?;
    Ok(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

fn read_f64(bytes: &mut &[u8]) -> Result<f64, FftError> {
    let raw = take(bytes, 8)?;
    let mut buf = [0u8; 8];
    buf.copy_from_slice(raw);
    Ok(f64::from_le_bytes(buf))
}

/// Parse a matrix file into its rows of f64 values.
pub fn read_matrix(bytes: &[u8]) -> Result<Vec<Vec<f64>>, FftError> {
    let mut cursor = bytes;
    if take(&mut cursor, 4)? != MAGIC {
        return Err(FftError::CorruptFormat);
    }
    let row_count = read_u32(&mut cursor)? as usize;
    let mut rows = Vec::with_capacity(row_count.min(cursor.len() / 4 + 1));
    for _ in 0..row_count {
        let len = read_u32(&mut cursor)? as usize;
        if cursor.len() / 8 < len {
            return Err(FftError::CorruptFormat);
        }
        let mut row = Vec::with_capacity(len);
        for _ in 0..len {
            row.push(read_f64(&mut cursor)?);
        }
        rows.push(row);
    }
    if !cursor.is_empty() {
        return Err(FftError::CorruptFormat);
    }
    Ok(rows)
}
