//! The block cipher oracle: a stateless-looking `E_K: 16 bytes -> 16 bytes`
//! built on top of a CBC encryptor run one block at a time with a zero IV.
//!
//! Running a CBC encryptor block-by-block like this, re-using the same
//! `Cipher` instance across a multi-block call, is exactly how the Feistel
//! round functions in [`crate::ff1`], [`crate::ff3`], and [`crate::ff3_1`]
//! get their CBC-MAC: each successive block is implicitly chained against
//! the ciphertext of the block before it.

use crate::error::Error;
use crate::result::Result;

use aes::cipher::BlockEncryptMut;
use aes::cipher::BlockSizeUser;
use aes::cipher::KeyIvInit;

/// Selects the 128-bit block cipher primitive bound into a [`Cipher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algo {
    Aes,
    Sm4,
}

#[derive(Clone)]
enum CbcType {
    Aes128(cbc::Encryptor<aes::Aes128>),
    Aes192(cbc::Encryptor<aes::Aes192>),
    Aes256(cbc::Encryptor<aes::Aes256>),
    Sm4(cbc::Encryptor<sm4::Sm4>),
}

#[derive(Clone)]
pub struct Cipher {
    enc: CbcType,
    blksz: usize,
}

macro_rules! construct_cipher {
    ($variant:ident, $type:ty, $key:expr, $iv:expr) => {
        Cipher {
            blksz: <$type as BlockSizeUser>::block_size(),
            enc: CbcType::$variant(cbc::Encryptor::<$type>::new(
                $key.into(),
                $iv.into(),
            )),
        }
    };
}

impl Cipher {
    /// Binds a cipher instance on `key`. For FF3/FF3-1 the caller passes
    /// the already-reversed key (see spec §4.1): this layer never
    /// reverses anything itself, it just instantiates the primitive.
    pub fn new(algo: Algo, key: &[u8]) -> Result<Cipher> {
        const IV: &[u8] = &[0u8; 16];

        Ok(match (algo, key.len()) {
            (Algo::Aes, 16) => construct_cipher!(Aes128, aes::Aes128, key, IV),
            (Algo::Aes, 24) => construct_cipher!(Aes192, aes::Aes192, key, IV),
            (Algo::Aes, 32) => construct_cipher!(Aes256, aes::Aes256, key, IV),
            (Algo::Aes, n) => {
                return Err(Error::invalid(format!(
                    "invalid AES key length; expected 16, 24, or 32 bytes, got {n}"
                )))
            }
            (Algo::Sm4, 16) => construct_cipher!(Sm4, sm4::Sm4, key, IV),
            (Algo::Sm4, n) => {
                return Err(Error::unsupported(format!(
                    "SM4 only supports 128-bit (16-byte) keys, got {n}"
                )))
            }
        })
    }

    /// Encrypts exactly one block, chaining through whatever ciphertext
    /// this `Cipher` last produced (CBC with the original zero IV on the
    /// first call). Padding is disabled; callers always supply full
    /// `block_size()`-byte blocks.
    pub fn encrypt_block(&mut self, src: &[u8], dst: &mut [u8]) -> Result<()> {
        if src.len() != self.blksz || dst.len() != self.blksz {
            return Err(Error::internal(format!(
                "block size mismatch: expected {}, got src={} dst={}",
                self.blksz,
                src.len(),
                dst.len()
            )));
        }

        match &mut self.enc {
            CbcType::Aes128(e) => e.encrypt_block_b2b_mut(src.into(), dst.into()),
            CbcType::Aes192(e) => e.encrypt_block_b2b_mut(src.into(), dst.into()),
            CbcType::Aes256(e) => e.encrypt_block_b2b_mut(src.into(), dst.into()),
            CbcType::Sm4(e) => e.encrypt_block_b2b_mut(src.into(), dst.into()),
        }

        Ok(())
    }

    pub fn block_size(&self) -> usize {
        self.blksz
    }
}
