use std::fmt;

use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, InnerIvInit, Iv};
use des::cipher::{Block, BlockDecrypt, BlockEncrypt, Key};
use zeroize::Zeroize;

use crate::error::DesError;
use crate::key_schedule::{DesSchedule, KeySchedule, TdesSchedule};
use crate::mode::ChainingMode;
use crate::padding::{self, Padding};
use crate::BLOCK_SIZE;

/// Single DES cipher
pub type DesCipher = Cipher<DesSchedule>;

/// Triple-DES (EDE) cipher
pub type TdesCipher = Cipher<TdesSchedule>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

/// DES family cipher holding a key, an optional IV and the key schedule derived from them.
///
/// The key schedule is computed once in [`Cipher::new`]. Chaining state is never kept between
/// calls: every [`Cipher::encrypt`] and [`Cipher::decrypt`] starts over from the IV, so the same
/// instance can process independent messages.
///
/// This type is intentionally not cloneable. Key material is wiped when the cipher is dropped.
pub struct Cipher<S: KeySchedule> {
    key: Vec<u8>,
    iv: Vec<u8>,
    mode: ChainingMode,
    material: Key<S::Primitive>,
    block_cipher: S::Primitive,
}

impl<S: KeySchedule> Cipher<S> {
    /// Creates a new cipher.
    ///
    /// An empty `iv` selects ECB, anything else selects CBC (see [`ChainingMode::from_iv`]).
    pub fn new(key: impl AsRef<[u8]>, iv: impl AsRef<[u8]>) -> Result<Self, DesError> {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(DesError::EmptyKey);
        }

        let iv = iv.as_ref();
        let mode = ChainingMode::from_iv(iv);
        let material = S::derive_key_material(key);
        let block_cipher = S::block_cipher(&material);

        log::trace!(
            "{} cipher ready ({} bytes key, {})",
            S::NAME,
            key.len(),
            if mode.is_cbc() { "CBC" } else { "ECB" }
        );

        Ok(Self {
            key: key.to_vec(),
            iv: iv.to_vec(),
            mode,
            material,
            block_cipher,
        })
    }

    /// Creates a new cipher in ECB mode.
    pub fn new_ecb(key: impl AsRef<[u8]>) -> Result<Self, DesError> {
        Self::new(key, b"")
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    pub fn mode(&self) -> ChainingMode {
        self.mode
    }

    /// Key material actually fed to the block cipher
    pub fn key_material(&self) -> &[u8] {
        self.material.as_slice()
    }

    /// Pads `data` with PKCS#5 and encrypts it.
    ///
    /// The result is always block aligned and between 1 and 8 bytes longer than `data`.
    pub fn encrypt(&self, data: &[u8]) -> Vec<u8> {
        let mut buf = padding::pad(data);
        self.process(&mut buf, Direction::Encrypt);
        buf
    }

    /// Decrypts `data` and removes PKCS#5 padding.
    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, DesError> {
        self.decrypt_with(data, Padding::Pkcs5)
    }

    /// Decrypts `data`, removing padding as requested.
    ///
    /// `data` must be a positive multiple of 8 bytes long. With [`Padding::Pkcs5`], only the trailing
    /// byte is used to locate the end of the plaintext.
    pub fn decrypt_with(&self, data: &[u8], padding: Padding) -> Result<Vec<u8>, DesError> {
        if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
            log::debug!("{} decryption rejected: {} bytes of ciphertext", S::NAME, data.len());
            return Err(DesError::InvalidCiphertextLength {
                len: data.len(),
                block_size: BLOCK_SIZE,
            });
        }

        let mut buf = data.to_vec();
        self.process(&mut buf, Direction::Decrypt);

        let plaintext = padding::strip(buf, padding);
        if let Err(e) = &plaintext {
            log::debug!("{} decryption failed: {}", S::NAME, e);
        }

        plaintext
    }

    /// Same as [`Cipher::decrypt_with`], but any failure yields an empty buffer.
    ///
    /// Useful for callers expecting the historical behavior, where an empty result is the only
    /// failure signal.
    pub fn decrypt_or_empty(&self, data: &[u8], padding: Padding) -> Vec<u8> {
        self.decrypt_with(data, padding).unwrap_or_default()
    }

    fn process(&self, buf: &mut [u8], direction: Direction) {
        let blocks = buf
            .chunks_exact_mut(BLOCK_SIZE)
            .map(Block::<S::Primitive>::from_mut_slice);

        match (self.mode, direction) {
            (ChainingMode::Ecb, Direction::Encrypt) => {
                blocks.for_each(|block| self.block_cipher.encrypt_block(block));
            }
            (ChainingMode::Ecb, Direction::Decrypt) => {
                blocks.for_each(|block| self.block_cipher.decrypt_block(block));
            }
            (ChainingMode::Cbc { iv }, Direction::Encrypt) => {
                let mut chain = cbc::Encryptor::<S::Primitive>::inner_iv_init(
                    self.block_cipher.clone(),
                    Iv::<cbc::Encryptor<S::Primitive>>::from_slice(&iv),
                );
                blocks.for_each(|block| chain.encrypt_block_mut(block));
            }
            (ChainingMode::Cbc { iv }, Direction::Decrypt) => {
                let mut chain = cbc::Decryptor::<S::Primitive>::inner_iv_init(
                    self.block_cipher.clone(),
                    Iv::<cbc::Decryptor<S::Primitive>>::from_slice(&iv),
                );
                blocks.for_each(|block| chain.decrypt_block_mut(block));
            }
        }
    }
}

impl<S: KeySchedule> fmt::Debug for Cipher<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cipher")
            .field("algorithm", &S::NAME)
            .field("mode", &if self.mode.is_cbc() { "CBC" } else { "ECB" })
            .finish_non_exhaustive()
    }
}

impl<S: KeySchedule> Drop for Cipher<S> {
    fn drop(&mut self) {
        self.key.zeroize();
        self.iv.zeroize();
        self.material.as_mut_slice().zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn empty_key_is_rejected() {
        assert_eq!(DesCipher::new_ecb(b"").unwrap_err(), DesError::EmptyKey);
        assert_eq!(TdesCipher::new(b"", b"12345678").unwrap_err(), DesError::EmptyKey);
    }

    #[test]
    fn constructor_keeps_key_and_iv_verbatim() {
        let cipher = TdesCipher::new("0123456789", "initialization vector").unwrap();

        assert_eq!(cipher.key(), b"0123456789");
        assert_eq!(cipher.iv(), b"initialization vector");
        assert_eq!(cipher.mode(), ChainingMode::Cbc { iv: *b"initiali" });
        assert_eq!(cipher.key_material(), b"0123456789\0\0\0\0\0\0\0\0\0\0\0\0\0\0");
    }

    #[test]
    fn des_known_answer() {
        let cipher = DesCipher::new_ecb(hex!("133457799BBCDFF1")).unwrap();
        let ciphertext = cipher.encrypt(&hex!("0123456789ABCDEF"));

        assert_eq!(ciphertext.len(), 16);
        assert_eq!(ciphertext[..8], hex!("85E813540F0AB405"));
    }

    #[test]
    fn empty_plaintext_is_one_padding_block() {
        let cipher = DesCipher::new_ecb(b"12345678").unwrap();

        let ciphertext = cipher.encrypt(b"");
        assert_eq!(ciphertext.len(), 8);
        assert_eq!(cipher.decrypt_with(&ciphertext, Padding::None).unwrap(), vec![8u8; 8]);
        assert_eq!(cipher.decrypt(&ciphertext).unwrap(), b"");
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(7)]
    #[case(9)]
    #[case(15)]
    fn misaligned_ciphertext_is_rejected(#[case] len: usize) {
        let cipher = TdesCipher::new(b"some key", b"some iv").unwrap();
        let data = vec![0x42u8; len];

        assert_eq!(
            cipher.decrypt(&data),
            Err(DesError::InvalidCiphertextLength { len, block_size: 8 })
        );
        assert!(cipher.decrypt_or_empty(&data, Padding::None).is_empty());
    }

    #[test]
    fn oversized_pad_value_is_rejected() {
        let cipher = DesCipher::new_ecb(b"12345678").unwrap();

        // first block of the ciphertext decrypts to a block ending with 0x10
        let ciphertext = cipher.encrypt(b"1234567\x10");
        let first_block = &ciphertext[..8];

        assert_eq!(cipher.decrypt(first_block), Err(DesError::Padding { len: 8, pad: 0x10 }));
        assert!(cipher.decrypt_or_empty(first_block, Padding::Pkcs5).is_empty());
        assert_eq!(
            cipher.decrypt_or_empty(first_block, Padding::None),
            b"1234567\x10".to_vec()
        );
    }

    #[test]
    fn inconsistent_padding_is_trimmed_by_last_byte() {
        let cipher = DesCipher::new(b"12345678", b"abcdefgh").unwrap();

        let ciphertext = cipher.encrypt(b"ABCDEFG\x03");
        let first_block = &ciphertext[..8];

        assert_eq!(cipher.decrypt(first_block).unwrap(), b"ABCDE");
    }

    #[test]
    fn state_is_not_carried_between_calls() {
        let cipher = TdesCipher::new(b"ABCDEFGHIJKLMNOPQRSTUVWX", b"12345678").unwrap();

        let first = cipher.encrypt(b"same message");
        let second = cipher.encrypt(b"same message");
        assert_eq!(first, second);
    }

    #[test]
    fn debug_output_hides_secrets() {
        let cipher = TdesCipher::new(b"super secret key", b"secret iv").unwrap();
        let debug = format!("{:?}", cipher);

        assert!(debug.contains("3DES"));
        assert!(debug.contains("CBC"));
        assert!(!debug.contains("secret"));
    }
}
