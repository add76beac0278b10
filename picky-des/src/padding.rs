//! PKCS#5 padding for 8-byte blocks.
//!
//! Unpadding only looks at the trailing byte: bytes in front of it are never checked against the
//! pad value. Ciphertexts produced by existing deployments rely on this leniency.

use crate::error::DesError;
use crate::BLOCK_SIZE;

/// Padding applied to the plaintext before encryption and removed after decryption.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Padding {
    /// PKCS#5: between 1 and 8 bytes, each holding the pad length
    #[default]
    Pkcs5,
    /// Decrypted buffer is returned as is, still block aligned
    None,
}

/// Pads `data` up to the next multiple of [`BLOCK_SIZE`].
///
/// Aligned input still receives a full block of padding, so the result is always longer than `data`.
pub fn pad(data: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_SIZE - data.len() % BLOCK_SIZE;

    let mut padded = Vec::with_capacity(data.len() + pad_len);
    padded.extend_from_slice(data);
    padded.resize(data.len() + pad_len, pad_len as u8);

    padded
}

/// Returns the length of the plaintext held in `buf` once padding is removed.
///
/// Fails when the trailing byte claims more padding than `buf` holds.
pub fn unpadded_len(buf: &[u8]) -> Result<usize, DesError> {
    let pad = match buf.last() {
        Some(pad) => *pad,
        None => return Err(DesError::Padding { len: 0, pad: 0 }),
    };

    // pad == len is the padded empty plaintext
    buf.len()
        .checked_sub(usize::from(pad))
        .ok_or(DesError::Padding { len: buf.len(), pad })
}

/// Truncates `buf` in place according to `padding`.
pub(crate) fn strip(mut buf: Vec<u8>, padding: Padding) -> Result<Vec<u8>, DesError> {
    if padding == Padding::Pkcs5 {
        let pos = unpadded_len(&buf)?;
        buf.truncate(pos);
    }

    Ok(buf)
}
