//! Byte twiddling utilities for moving between records of `2u` bytes
//! and `Block`.  Plaintext records are big-endian, ciphertext records
//! (and the header) are little-endian.

use super::Block;

const WIDTH: usize = std::mem::size_of::<Block>();

/// Interprets `record` (at most 16 bytes) as a big-endian block.
pub fn read_be(record: &[u8]) -> Block {
    debug_assert!(record.len() <= WIDTH);
    let mut bytes = [0; WIDTH];
    bytes[WIDTH - record.len()..].copy_from_slice(record);
    Block::from_be_bytes(bytes)
}

/// Interprets `record` (at most 16 bytes) as a little-endian block.
pub fn read_le(record: &[u8]) -> Block {
    debug_assert!(record.len() <= WIDTH);
    let mut bytes = [0; WIDTH];
    bytes[..record.len()].copy_from_slice(record);
    Block::from_le_bytes(bytes)
}

/// Writes the low `out.len()` bytes of `block` big-endian.
pub fn write_be(block: Block, out: &mut [u8]) {
    let bytes = block.to_be_bytes();
    out.copy_from_slice(&bytes[WIDTH - out.len()..]);
}

/// Writes the low `out.len()` bytes of `block` little-endian.
pub fn write_le(block: Block, out: &mut [u8]) {
    let bytes = block.to_le_bytes();
    out.copy_from_slice(&bytes[..out.len()]);
}

/// Length of `record` once its trailing zero bytes are dropped.
pub fn trimmed_len(record: &[u8]) -> usize {
    record.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1)
}

#[test]
fn byte_orders() {
    let record = [0x01, 0x02, 0x03, 0x04];
    assert_eq!(read_be(&record), 0x0102_0304);
    assert_eq!(read_le(&record), 0x0403_0201);

    let mut out = [0; 4];
    write_be(0x0102_0304, &mut out);
    assert_eq!(out, record);
    write_le(0x0403_0201, &mut out);
    assert_eq!(out, record);
}

#[test]
fn full_width_records() {
    let record: Vec<u8> = (1..=16).collect();
    let mut out = [0; 16];
    write_le(read_le(&record), &mut out);
    assert_eq!(&out[..], &record[..]);
    write_be(read_be(&record), &mut out);
    assert_eq!(&out[..], &record[..]);
}

#[test]
fn trailing_zeros() {
    assert_eq!(trimmed_len(b"ab\0c\0\0"), 4);
    assert_eq!(trimmed_len(b"\0\0\0"), 0);
    assert_eq!(trimmed_len(b""), 0);
    assert_eq!(trimmed_len(b"abc"), 3);
}
