use std::io;

use crate::cipher::Rc5;
use crate::error::{Error, Result};
use crate::mem;
use crate::Block;

const MAX_BLOCK: usize = 16;

fn decrypt_chunk(cipher: &Rc5, link: &mut Block, chunk: &[u8], out: &mut [u8]) {
    let block = mem::read_le(chunk);
    let plain = cipher.decipher(block) ^ *link;
    *link = block;
    mem::write_be(plain, out);
}

// Fills `record` from `source`.  Returns `Ok(false)` on a clean end of
// input and an error if the input stops part way through the record.
fn read_record<R: io::Read>(source: &mut R, record: &mut [u8]) -> Result<bool> {
    let mut filled = 0;
    while filled < record.len() {
        match source.read(&mut record[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    match filled {
        0 => Ok(false),
        n if n == record.len() => Ok(true),
        found => Err(Error::Truncated {
            expected: record.len(),
            found,
        }),
    }
}

// `Error` can't be cloned (`io::Error` can't), so rebuild an equivalent
// one to hand out again on later reads.
fn replay(err: &Error) -> Error {
    match err {
        Error::Truncated { expected, found } => Error::Truncated {
            expected: *expected,
            found: *found,
        },
        Error::Io(e) => Error::Io(io::Error::new(e.kind(), e.to_string())),
        other => Error::Io(io::Error::new(io::ErrorKind::Other, other.to_string())),
    }
}

/// Wraps an underlying `std::io::Read` so that bytes read get decrypted
/// on the way through.
///
/// The header is consumed when the `Reader` is built.  One decrypted
/// block is always held back so that zero-fill can be stripped from
/// the last block only; that also strips any genuine trailing zero
/// bytes the plaintext ended with.
///
/// Once a read fails, every later read fails with the same error and no
/// further plaintext is released.
///
/// # Example:
/// ```
/// use std::io::{Read, Write};
/// use rc5::Rc5;
/// use rc5::io::{Reader, Writer};
///
/// let rc5 = Rc5::new(32, 12, b"key").unwrap();
/// let mut crypt = Writer::new(Vec::new(), &rc5, 7).unwrap();
/// crypt.write_all(b"Hello, world!").unwrap();
/// let ciphertext = crypt.close().unwrap();
///
/// let mut decrypt = Reader::new(&ciphertext[..], &rc5).unwrap();
/// let mut s = String::new();
/// decrypt.read_to_string(&mut s).unwrap();
/// assert_eq!("Hello, world!", s);
/// ```
pub struct Reader<'c, R: io::Read> {
    source: R,
    cipher: &'c Rc5,
    link: Block,
    held: Option<[u8; MAX_BLOCK]>,
    ready: [u8; MAX_BLOCK],
    ready_len: usize,
    pos: usize,
    done: bool,
    failed: Option<Error>,
}

impl<'c, R: io::Read> Reader<'c, R> {
    /// Wraps `source` in a `Reader` that decrypts with `cipher`, reading
    /// the chaining header right away.  A missing or short header is
    /// reported as `Error::Truncated`.
    pub fn new(mut source: R, cipher: &'c Rc5) -> Result<Reader<'c, R>> {
        let block_len = cipher.block_len();
        let mut header = [0; MAX_BLOCK];
        if !read_record(&mut source, &mut header[..block_len])? {
            return Err(Error::Truncated {
                expected: block_len,
                found: 0,
            });
        }

        Ok(Reader {
            source,
            cipher,
            link: mem::read_le(&header[..block_len]),
            held: None,
            ready: [0; MAX_BLOCK],
            ready_len: 0,
            pos: 0,
            done: false,
            failed: None,
        })
    }

    // Pulls the next record from the source.  The previously held block
    // becomes readable in full; at end of input the held block is the
    // last one and loses its trailing zeros.
    fn advance(&mut self) -> Result<()> {
        let block_len = self.cipher.block_len();
        let mut record = [0; MAX_BLOCK];

        if read_record(&mut self.source, &mut record[..block_len])? {
            let mut plain = [0; MAX_BLOCK];
            decrypt_chunk(self.cipher, &mut self.link, &record[..block_len], &mut plain[..block_len]);
            if let Some(previous) = self.held.replace(plain) {
                self.set_ready(previous, block_len);
            }
        } else {
            self.done = true;
            if let Some(last) = self.held.take() {
                let len = mem::trimmed_len(&last[..block_len]);
                self.set_ready(last, len);
            }
        }
        Ok(())
    }

    fn set_ready(&mut self, bytes: [u8; MAX_BLOCK], len: usize) {
        self.ready = bytes;
        self.ready_len = len;
        self.pos = 0;
    }
}

impl<'c, R: io::Read> io::Read for Reader<'c, R> {
    /// Reads from `source`, decrypts the data, and writes the result
    /// to `buf`.  Corrupt input surfaces as `io::ErrorKind::InvalidData`.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if let Some(err) = &self.failed {
            return Err(replay(err).into());
        }
        while self.pos == self.ready_len {
            if self.done {
                return Ok(0);
            }
            if let Err(err) = self.advance() {
                self.held = None;
                self.set_ready([0; MAX_BLOCK], 0);
                self.failed = Some(replay(&err));
                return Err(err.into());
            }
        }

        let available = &self.ready[self.pos..self.ready_len];
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.pos += n;
        Ok(n)
    }
}

#[test]
fn it_works() {
    use super::Writer;
    use std::io::{Read, Write};

    let rc5 = Rc5::new(32, 12, &[1, 2, 3, 4]).unwrap();
    for chunk_size in 1..65 {
        let input: Vec<u8> = (1u8..129).collect();
        let mut writer = Writer::new(Vec::with_capacity(136), &rc5, 0x0005_0000_0006).unwrap();
        for chunk in input.chunks(chunk_size) {
            assert_eq!(writer.write(chunk).unwrap(), chunk.len());
        }
        let ciphertext = writer.close().unwrap();

        let mut reader = Reader::new(&ciphertext[..], &rc5).unwrap();
        let mut output = Vec::new();
        let mut buf = vec![0; chunk_size];
        loop {
            let n = reader.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            output.extend_from_slice(&buf[..n]);
        }
        assert_eq!(input, output);
    }
}

#[test]
fn interior_zero_bytes_survive() {
    use super::Writer;
    use std::io::{Read, Write};

    let rc5 = Rc5::new(32, 12, b"key").unwrap();
    let input = b"abcdefg\0\0\0\0\0\0\0\0\0xyz";
    let mut writer = Writer::new(Vec::new(), &rc5, 99).unwrap();
    writer.write_all(input).unwrap();
    let ciphertext = writer.close().unwrap();

    let mut output = Vec::new();
    Reader::new(&ciphertext[..], &rc5).unwrap().read_to_end(&mut output).unwrap();
    assert_eq!(&output[..], &input[..]);
}

#[test]
fn zero_ciphertext_record_does_not_end_stream() {
    use std::io::Read;

    let rc5 = Rc5::new(32, 12, b"key").unwrap();
    let link: Block = 0x1122_3344_5566_7788;
    let tail: Block = 0x0102_0304_0506_0708;

    let mut stream = vec![0; 24];
    mem::write_le(link, &mut stream[..8]);
    // stream[8..16] stays all zero
    mem::write_le(tail, &mut stream[16..]);

    let mut output = Vec::new();
    Reader::new(&stream[..], &rc5).unwrap().read_to_end(&mut output).unwrap();

    let mut first = [0; 8];
    mem::write_be(rc5.decrypt_block(0).unwrap() ^ link, &mut first);
    let mut second = [0; 8];
    mem::write_be(rc5.decrypt_block(tail).unwrap(), &mut second);
    let second_len = mem::trimmed_len(&second);

    assert_eq!(output.len(), 8 + second_len);
    assert_eq!(&output[..8], &first[..]);
    assert_eq!(&output[8..], &second[..second_len]);
}

#[test]
fn short_record_is_reported() {
    use std::io::Read;

    let rc5 = Rc5::new(32, 12, b"key").unwrap();
    let stream = [0xAA; 8 + 8 + 5];
    let mut output = Vec::new();
    let err = Reader::new(&stream[..], &rc5)
        .unwrap()
        .read_to_end(&mut output)
        .unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    assert!(matches!(Error::from(err), Error::Truncated { expected: 8, found: 5 }));
}

#[test]
fn reads_after_truncation_keep_failing() {
    use super::Writer;
    use std::io::{Read, Write};

    let rc5 = Rc5::new(32, 12, b"key").unwrap();
    let mut writer = Writer::new(Vec::new(), &rc5, 11).unwrap();
    writer.write_all(b"0123456789abcdef").unwrap();
    let ciphertext = writer.close().unwrap();
    let cut = &ciphertext[..ciphertext.len() - 3];

    let mut reader = Reader::new(cut, &rc5).unwrap();
    let mut buf = [0; 64];
    let err = reader.read(&mut buf).unwrap_err();
    assert!(matches!(Error::from(err), Error::Truncated { expected: 8, found: 5 }));

    for _ in 0..3 {
        let err = reader.read(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(matches!(Error::from(err), Error::Truncated { expected: 8, found: 5 }));
    }
}

#[test]
fn missing_header_is_reported() {
    let rc5 = Rc5::new(64, 12, b"key").unwrap();
    assert!(matches!(
        Reader::new(&[0u8; 0][..], &rc5),
        Err(Error::Truncated { expected: 16, found: 0 })
    ));
    assert!(matches!(
        Reader::new(&[0u8; 9][..], &rc5),
        Err(Error::Truncated { expected: 16, found: 9 })
    ));
}
