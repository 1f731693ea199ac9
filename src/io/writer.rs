use std::io;

use crate::cipher::Rc5;
use crate::error::Result;
use crate::mem;
use crate::Block;

const MAX_BLOCK: usize = 16;

// Encrypts one full plaintext record, advancing the chaining link.
fn encrypt_chunk(cipher: &Rc5, link: &mut Block, chunk: &[u8], out: &mut [u8]) {
    let block = cipher.encipher(mem::read_be(chunk) ^ *link);
    *link = block;
    mem::write_le(block, out);
}

/// Wraps an underlying `std::io::Write` so that bytes written get
/// encrypted on the way through.
///
/// The header is written to the sink as soon as the `Writer` is built.
/// Bytes that don't fill a whole block are held back until more data
/// arrives or the `Writer` is closed, at which point they are padded
/// with zero bytes.
///
/// You must call `close()` when finished writing.  A `Writer` that is
/// just dropped leaves its held-back bytes out of the stream, and the
/// shorter stream still decrypts without error.
///
/// # Example:
/// ```
/// use std::io::Write;
/// use rc5::Rc5;
/// use rc5::io::Writer;
///
/// let rc5 = Rc5::new(32, 12, b"key").unwrap();
/// let mut crypt = Writer::new(Vec::new(), &rc5, 0x0123_4567_89AB_CDEF).unwrap();
/// crypt.write_all(b"Hello, world!").unwrap();
/// let ciphertext = crypt.close().unwrap();
/// assert_eq!(ciphertext.len(), 8 + 16);
/// ```
pub struct Writer<'c, W: io::Write> {
    sink: W,
    cipher: &'c Rc5,
    link: Block,
    buf: Vec<u8>,
    blocks: u64,
}

impl<'c, W: io::Write> Writer<'c, W> {
    /// Wraps `sink` in a `Writer` that encrypts with `cipher`, chaining
    /// from `seed`.  The seed must fit in one block; what lands in the
    /// header is the seed run through the inverse cipher once.
    pub fn new(mut sink: W, cipher: &'c Rc5, seed: Block) -> Result<Writer<'c, W>> {
        cipher.check(seed)?;
        let link = cipher.decipher(seed);

        let block_len = cipher.block_len();
        let mut header = [0; MAX_BLOCK];
        mem::write_le(link, &mut header[..block_len]);
        sink.write_all(&header[..block_len])?;

        Ok(Writer {
            sink,
            cipher,
            link,
            buf: Vec::with_capacity(block_len),
            blocks: 0,
        })
    }

    /// Number of ciphertext records written so far, not counting the
    /// header.
    pub fn blocks_written(&self) -> u64 {
        self.blocks
    }

    /// Zero-fills and writes the final partial block, if there is one,
    /// flushes, and returns the underlying `std::io::Write` object.
    pub fn close(mut self) -> Result<W> {
        if !self.buf.is_empty() {
            self.buf.resize(self.cipher.block_len(), 0);
            let last = std::mem::take(&mut self.buf);
            self.write_block(&last)?;
        }
        self.sink.flush()?;
        Ok(self.sink)
    }

    fn write_block(&mut self, chunk: &[u8]) -> io::Result<()> {
        let mut out = [0; MAX_BLOCK];
        let out = &mut out[..chunk.len()];
        encrypt_chunk(self.cipher, &mut self.link, chunk, out);
        self.sink.write_all(out)?;
        self.blocks += 1;
        Ok(())
    }
}

impl<'c, W: io::Write> io::Write for Writer<'c, W> {
    /// Encrypts the whole blocks available in `buf` (together with any
    /// bytes held back from earlier calls) and passes them through to
    /// the underlying `std::io::Write`.  Always accepts all of `buf`.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let block_len = self.cipher.block_len();
        let mut rest = buf;

        if !self.buf.is_empty() {
            let take = (block_len - self.buf.len()).min(rest.len());
            self.buf.extend_from_slice(&rest[..take]);
            rest = &rest[take..];
            if self.buf.len() < block_len {
                return Ok(buf.len());
            }
            let full = std::mem::take(&mut self.buf);
            self.write_block(&full)?;
            self.buf = full;
            self.buf.clear();
        }

        let mut chunks = rest.chunks_exact(block_len);
        for chunk in &mut chunks {
            self.write_block(chunk)?;
        }
        self.buf.extend_from_slice(chunks.remainder());

        Ok(buf.len())
    }

    /// Flushes the underlying `std::io::Write`.  Bytes short of a full
    /// block stay buffered until `close`.
    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}

#[test]
fn it_works() {
    use std::io::Write;

    let rc5 = Rc5::new(32, 12, &[1, 2, 3, 4]).unwrap();
    let input: Vec<u8> = (0u8..128).collect();
    let mut writer = Writer::new(Vec::with_capacity(136), &rc5, 0x0005_0000_0006).unwrap();
    for chunk in input.chunks(16) {
        assert_eq!(writer.write(chunk).unwrap(), 16);
    }
    assert_eq!(writer.blocks_written(), 16);

    let result = writer.close().unwrap();
    assert_eq!(result.len(), input.len() + 8);
    assert!(result[8..] != input[..])
}

#[test]
fn header_is_inverse_of_seed() {
    let rc5 = Rc5::new(32, 12, b"key").unwrap();
    let seed = 0x0123_4567_89AB_CDEF;
    let out = Writer::new(Vec::new(), &rc5, seed).unwrap().close().unwrap();
    assert_eq!(out.len(), 8);
    assert_eq!(mem::read_le(&out), rc5.decrypt_block(seed).unwrap());
    assert_eq!(rc5.encrypt_block(mem::read_le(&out)).unwrap(), seed);
}

#[test]
fn write_sizes_do_not_change_output() {
    use std::io::Write;

    let rc5 = Rc5::new(16, 12, b"chunking").unwrap();
    let input: Vec<u8> = (0u8..101).collect();

    let mut whole = Writer::new(Vec::new(), &rc5, 42).unwrap();
    whole.write_all(&input).unwrap();
    let expected = whole.close().unwrap();

    for chunk_size in 1..20 {
        let mut writer = Writer::new(Vec::new(), &rc5, 42).unwrap();
        for chunk in input.chunks(chunk_size) {
            writer.write_all(chunk).unwrap();
        }
        assert_eq!(writer.close().unwrap(), expected, "chunk size {}", chunk_size);
    }
}

#[test]
fn seed_must_fit_in_a_block() {
    use crate::error::Error;

    let rc5 = Rc5::new(16, 12, b"key").unwrap();
    match Writer::new(Vec::new(), &rc5, 1 << 32) {
        Err(Error::BlockOutOfRange { bits, .. }) => assert_eq!(bits, 32),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("oversized seed accepted"),
    }
}

#[test]
fn dropping_without_close_loses_partial_block() {
    use std::io::{Read, Write};
    use super::Reader;

    let rc5 = Rc5::new(32, 12, b"key").unwrap();
    let mut sink = Vec::new();
    {
        let mut writer = Writer::new(&mut sink, &rc5, 3).unwrap();
        writer.write_all(b"0123456789").unwrap();
    }
    assert_eq!(sink.len(), 16);

    let mut output = String::new();
    Reader::new(&sink[..], &rc5).unwrap().read_to_string(&mut output).unwrap();
    assert_eq!(output, "01234567");

    let mut writer = Writer::new(Vec::new(), &rc5, 3).unwrap();
    writer.write_all(b"0123456789").unwrap();
    let closed = writer.close().unwrap();
    let mut output = String::new();
    Reader::new(&closed[..], &rc5).unwrap().read_to_string(&mut output).unwrap();
    assert_eq!(output, "0123456789");
}
