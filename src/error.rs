//! Error and result types shared by the whole crate.

use std::io;

use super::Block;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while setting up the cipher or running
/// a stream through it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No magic constants exist for this word size.
    #[error("unsupported word size: {0} bits (expected 16, 32 or 64)")]
    UnsupportedWordSize(u32),

    /// A key length in bits that is not a whole number of bytes.
    #[error("invalid key length: {0} bits is not a multiple of 8")]
    InvalidKeyLength(usize),

    /// A block or seed wider than two words.
    #[error("block {block:#x} does not fit in {bits} bits")]
    BlockOutOfRange { block: Block, bits: u32 },

    /// The stream ended in the middle of a record, or before the header.
    #[error("truncated stream: expected a {expected}-byte record, found {found} bytes")]
    Truncated { expected: usize, found: usize },

    /// The byte source or sink failed.
    #[error("I/O error: {0}")]
    Io(#[source] io::Error),
}

// Our errors cross `std::io::Read`/`Write` boundaries wrapped in an
// `io::Error`; unwrap them again so callers can match on the variant.
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        let ours = err.get_ref().is_some_and(|inner| inner.is::<Error>());
        if !ours {
            return Error::Io(err);
        }
        let kind = err.kind();
        match err.into_inner().map(|inner| inner.downcast::<Error>()) {
            Some(Ok(inner)) => *inner,
            Some(Err(other)) => Error::Io(io::Error::new(kind, other)),
            None => Error::Io(kind.into()),
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        match err {
            Error::Io(inner) => inner,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

#[test]
fn truncation_survives_io_round_trip() {
    let err = Error::Truncated { expected: 8, found: 3 };
    let wrapped: io::Error = err.into();
    assert_eq!(wrapped.kind(), io::ErrorKind::InvalidData);

    match Error::from(wrapped) {
        Error::Truncated { expected, found } => {
            assert_eq!(expected, 8);
            assert_eq!(found, 3);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn plain_io_errors_stay_io() {
    let err = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
    match err {
        Error::Io(inner) => assert_eq!(inner.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn messages() {
    assert_eq!(
        Error::UnsupportedWordSize(24).to_string(),
        "unsupported word size: 24 bits (expected 16, 32 or 64)"
    );
    assert_eq!(
        Error::BlockOutOfRange { block: 0x1_0000_0000, bits: 32 }.to_string(),
        "block 0x100000000 does not fit in 32 bits"
    );
}
