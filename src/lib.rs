//! Implements the RC5 block cipher with a selectable word size (16, 32
//! or 64 bits), any number of rounds and a key of any length.
//!
//! Also implements a chained file mode on top of it, close to CBC but
//! with a header derived from a random seed and zero-fill padding.  It
//! has no authentication, so don't use it where integrity matters.
//!
//! # Example:
//! ```
//! use rc5::Rc5;
//!
//! let rc5 = Rc5::new(32, 12, &[0; 16]).unwrap();
//! assert_eq!(rc5.encrypt_block(0).unwrap(), 0xEEDB_A521_6D8F_4B15);
//! ```

/// A word is at most 64 bits; narrower word sizes keep the high bits
/// clear.
pub type Word = u64;

/// A block is two words, so at most 128 bits.  The first word (A) is
/// the high half, the second (B) the low half.
pub type Block = u128;

pub mod cipher;
pub mod error;
pub mod io;
pub mod key;
pub mod params;
pub mod word;
mod mem;

pub use cipher::Rc5;
pub use error::{Error, Result};
pub use key::KeySchedule;
pub use params::Params;
pub use word::WordSize;
