//! Key material derivation for DES and Triple-DES.
//!
//! Keys are taken as arbitrary byte strings and fitted into the fixed-size key expected by the block
//! cipher. Triple-DES follows three historical conventions depending on the key length, see
//! [`TdesKeyTier`].

use des::cipher::consts::U8;
use des::cipher::{BlockCipher, BlockDecrypt, BlockEncrypt, BlockSizeUser, Key, KeyInit};

use crate::BLOCK_SIZE;

/// Cipher family: how a user key becomes block cipher key material.
pub trait KeySchedule {
    /// Single block transform keyed by the derived material
    type Primitive: BlockCipher + BlockSizeUser<BlockSize = U8> + BlockEncrypt + BlockDecrypt + KeyInit + Clone;

    const NAME: &'static str;

    /// Derives fixed-size key material from `key`.
    fn derive_key_material(key: &[u8]) -> Key<Self::Primitive>;

    fn block_cipher(material: &Key<Self::Primitive>) -> Self::Primitive {
        <Self::Primitive as KeyInit>::new(material)
    }
}

/// Single DES: first 8 bytes of the key, zero-padded on the right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DesSchedule;

impl KeySchedule for DesSchedule {
    type Primitive = des::Des;

    const NAME: &'static str = "DES";

    fn derive_key_material(key: &[u8]) -> Key<des::Des> {
        let mut material = Key::<des::Des>::default();
        copy_prefix(&mut material, key);
        material
    }
}

/// Triple-DES in EDE mode with a 24-byte key built according to [`TdesKeyTier`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TdesSchedule;

impl KeySchedule for TdesSchedule {
    type Primitive = des::TdesEde3;

    const NAME: &'static str = "3DES";

    fn derive_key_material(key: &[u8]) -> Key<des::TdesEde3> {
        let mut material = Key::<des::TdesEde3>::default();

        let tier = TdesKeyTier::from_key_len(key.len());
        log::trace!("{} byte 3DES key uses {:?} tier", key.len(), tier);

        match tier {
            TdesKeyTier::ThreeKey => {
                copy_prefix(&mut material, key);
            }
            TdesKeyTier::TwoKey => {
                // third segment is left zeroed, not a copy of the first one
                copy_prefix(&mut material[..2 * BLOCK_SIZE], key);
            }
            TdesKeyTier::SingleKey => {
                for segment in material.chunks_exact_mut(BLOCK_SIZE) {
                    copy_prefix(segment, key);
                }
            }
        }

        material
    }
}

/// Triple-DES key length conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TdesKeyTier {
    /// Up to 8 bytes, copied into all three segments (DES strength)
    SingleKey,
    /// 9 to 16 bytes, copied into the first two segments; the third one is left zeroed
    TwoKey,
    /// More than 16 bytes, the first 24 are used
    ThreeKey,
}

impl TdesKeyTier {
    pub fn from_key_len(len: usize) -> Self {
        if len > 2 * BLOCK_SIZE {
            Self::ThreeKey
        } else if len > BLOCK_SIZE {
            Self::TwoKey
        } else {
            Self::SingleKey
        }
    }
}

fn copy_prefix(dst: &mut [u8], src: &[u8]) {
    let len = dst.len().min(src.len());
    dst[..len].copy_from_slice(&src[..len]);
}
