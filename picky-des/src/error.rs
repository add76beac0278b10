use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DesError {
    /// key is required to build a key schedule
    #[error("DES key must not be empty")]
    EmptyKey,

    /// ciphertext is empty or not block aligned
    #[error("invalid ciphertext length: {len} is not a positive multiple of {block_size}")]
    InvalidCiphertextLength { len: usize, block_size: usize },

    /// trailing pad byte is larger than the buffer
    #[error("couldn't remove padding: pad value {pad} doesn't fit in a {len} bytes buffer")]
    Padding { len: usize, pad: u8 },
}
