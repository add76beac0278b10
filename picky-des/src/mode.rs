use crate::BLOCK_SIZE;

/// Block chaining selected from the IV given at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainingMode {
    /// Electronic codebook: every block is processed independently
    Ecb,
    /// Cipher block chaining seeded with an 8-byte IV
    Cbc { iv: [u8; BLOCK_SIZE] },
}

impl ChainingMode {
    /// An empty IV selects ECB. Any other IV selects CBC, using its first 8 bytes and zero-padding
    /// shorter ones.
    pub fn from_iv(iv: &[u8]) -> Self {
        if iv.is_empty() {
            return Self::Ecb;
        }

        let mut block = [0u8; BLOCK_SIZE];
        let len = iv.len().min(BLOCK_SIZE);
        block[..len].copy_from_slice(&iv[..len]);

        Self::Cbc { iv: block }
    }

    pub fn is_cbc(&self) -> bool {
        matches!(self, Self::Cbc { .. })
    }
}
