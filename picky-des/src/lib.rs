//! # picky-des
//!
//! DES and Triple-DES encryption with PKCS#5 padding and ECB or CBC chaining.
//!
//! Keys and IVs are plain byte strings of any length; they are fitted to the sizes expected by the
//! block cipher following conventions shared with widely deployed tools:
//!
//! - DES uses the first 8 bytes of the key.
//! - 3DES uses one, two or three key segments depending on the key length (see [`TdesKeyTier`]).
//! - A non-empty IV selects CBC, an empty one selects ECB.
//!
//! ```
//! use picky_des::TdesCipher;
//!
//! let cipher = TdesCipher::new(b"0123456789abcdef", b"12345678").unwrap();
//! let ciphertext = cipher.encrypt(b"hello");
//! assert_eq!(ciphertext.len(), 8);
//! assert_eq!(cipher.decrypt(&ciphertext).unwrap(), b"hello");
//! ```

mod cipher;
mod error;
mod key_schedule;
mod mode;

pub mod padding;

pub use cipher::{Cipher, DesCipher, TdesCipher};
pub use error::DesError;
pub use key_schedule::{DesSchedule, KeySchedule, TdesKeyTier, TdesSchedule};
pub use mode::ChainingMode;
pub use padding::Padding;

/// DES block size, in bytes
pub const BLOCK_SIZE: usize = 8;
