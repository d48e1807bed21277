//! Shared plumbing for the three Feistel constructions: the bound block
//! cipher, length/tweak validation, the CBC-MAC-style PRF, and the radix
//! codec (`NUM_r` / `STR_r` and their reversed counterparts).
//!
//! FF1 renders digit arrays with digit 0 most significant ("standard"
//! order); FF3/FF3-1 render them with digit 0 least significant
//! ("reversed" order, spec §4.2). Both directions share the same
//! underlying `num_bigint::BigInt` Horner's-method conversion; only the
//! orientation of the digit slice differs, so the reversed variants are
//! implemented by reversing the slice around a call to the standard one,
//! following the same trick the teacher crate uses to avoid writing two
//! independent big-number routines.

use crate::cipher::{Algo, Cipher};
use crate::error::Error;
use crate::result::Result;

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

pub const MAX_RADIX: usize = 65_536;
pub const MAX_TEXT_LEN: usize = 256;

pub enum CipherType {
    Encrypt,
    Decrypt,
}

struct SizeLimits {
    min: usize,
    max: usize,
}

struct FfxSizeLimits {
    twk: SizeLimits,
    txt: SizeLimits,
}

/// Base context shared by FF1/FF3/FF3-1: a bound cipher, radix, and the
/// length limits spec'd for whichever mode constructs it.
pub struct Ffx {
    cipher: Cipher,
    radix: usize,
    len: FfxSizeLimits,
}

impl Ffx {
    /// `key` must already be the key the mode wants to bind on — FF3/FF3-1
    /// reverse it before calling this (spec §4.1); this layer doesn't.
    pub fn new(
        algo: Algo,
        key: &[u8],
        radix: usize,
        mintxt: usize,
        maxtxt: usize,
        mintwk: usize,
        maxtwk: usize,
    ) -> Result<Self> {
        if !(2..=MAX_RADIX).contains(&radix) {
            return Err(Error::invalid(format!(
                "invalid radix; must be between 2 and {MAX_RADIX}, got {radix}"
            )));
        }

        if mintxt < 2 {
            return Err(Error::invalid(
                "minimum text length must be at least 2",
            ));
        }
        let maxtxt = maxtxt.min(MAX_TEXT_LEN);
        if mintxt > maxtxt {
            return Err(Error::invalid(format!(
                "radix {radix} allows no valid text length at or below the {MAX_TEXT_LEN}-symbol safety cap"
            )));
        }

        if maxtwk > 0 && mintwk > maxtwk {
            return Err(Error::invalid(
                "minimum tweak length must be less than maximum",
            ));
        }

        Ok(Ffx {
            cipher: Cipher::new(algo, key)?,
            radix,
            len: FfxSizeLimits {
                twk: SizeLimits { min: mintwk, max: maxtwk },
                txt: SizeLimits { min: mintxt, max: maxtxt },
            },
        })
    }

    pub fn get_radix(&self) -> usize {
        self.radix
    }

    pub fn get_cipher_block_size(&self) -> usize {
        self.cipher.block_size()
    }

    pub fn validate_text_length(&self, n: usize) -> Result<()> {
        if n < self.len.txt.min || n > self.len.txt.max {
            return Err(Error::invalid(format!(
                "invalid text length; expected between {} and {} symbols, got {}",
                self.len.txt.min, self.len.txt.max, n
            )));
        }
        Ok(())
    }

    pub fn validate_tweak_length(&self, n: usize) -> Result<()> {
        let twk = &self.len.twk;
        let bad = n < twk.min || (twk.max > 0 && n > twk.max);
        if bad {
            return if twk.max > 0 && twk.min == twk.max {
                Err(Error::invalid(format!(
                    "invalid tweak length; expected exactly {} bytes, got {}",
                    twk.min, n
                )))
            } else if twk.max > 0 {
                Err(Error::invalid(format!(
                    "invalid tweak length; expected between {} and {} bytes, got {}",
                    twk.min, twk.max, n
                )))
            } else {
                Err(Error::invalid(format!(
                    "invalid tweak length; expected at least {} bytes, got {}",
                    twk.min, n
                )))
            };
        }
        Ok(())
    }

    pub fn validate_digits(&self, x: &[u16]) -> Result<()> {
        for (i, &d) in x.iter().enumerate() {
            if d as usize >= self.radix {
                return Err(Error::invalid(format!(
                    "digit {} at position {} is not < radix {}",
                    d, i, self.radix
                )));
            }
        }
        Ok(())
    }

    /// CBC-MAC over however many whole blocks are in `s`: chains through
    /// the bound `Cipher`, which remembers the ciphertext of the block
    /// it last encrypted. `d` receives only the *last* block's output.
    pub fn prf(&self, s: &[u8], d: &mut [u8]) -> Result<()> {
        let mut c = self.cipher.clone();
        let blksz = c.block_size();

        for i in 0..(s.len() / blksz) {
            let j = i * blksz;
            c.encrypt_block(&s[j..(j + blksz)], d)?;
        }

        Ok(())
    }

    /// A single 16-byte block through the cipher, with no chaining state
    /// surviving the call (used by FF3/FF3-1's per-round `E_K`).
    pub fn ciph(&self, s: &[u8], d: &mut [u8]) -> Result<()> {
        let mut c = self.cipher.clone();
        c.encrypt_block(&s[..c.block_size()], d)
    }

    /// Standard-order `NUM_r(X)`: `X[0]` is most significant.
    pub fn digits_to_bignum(&self, x: &[u16]) -> BigInt {
        let r = BigInt::from(self.radix as u32);
        let mut acc = BigInt::zero();
        for &d in x {
            acc = acc * &r + BigInt::from(d as u32);
        }
        acc
    }

    /// Standard-order `STR_r(Y, m)`: produces exactly `len` digits with
    /// digit 0 most significant, left-padding with zero digits.
    pub fn bignum_to_digits(&self, n: &BigInt, len: usize) -> Vec<u16> {
        let r = BigInt::from(self.radix as u32);
        let mut acc = n.clone();
        let mut digits = Vec::with_capacity(len);
        for _ in 0..len {
            let rem = &acc % &r;
            acc /= &r;
            digits.push(rem.to_u16().unwrap_or(0));
        }
        digits.reverse();
        digits
    }

    /// Reversed-order `NUM_r^rev(X)`: `X[0]` is least significant.
    /// Equivalent to `NUM_r(reverse(X))`.
    pub fn digits_to_bignum_rev(&self, x: &[u16]) -> BigInt {
        let mut rx = x.to_vec();
        rx.reverse();
        self.digits_to_bignum(&rx)
    }

    /// Reversed-order `STR_r^rev(Y, m)`: digit 0 least significant.
    pub fn bignum_to_digits_rev(&self, n: &BigInt, len: usize) -> Vec<u16> {
        let mut digits = self.bignum_to_digits(n, len);
        digits.reverse();
        digits
    }

    /// Renders a non-negative bignum as a big-endian byte string of
    /// exactly `len` bytes (caller guarantees `n < 256^len`).
    pub fn bignum_to_bytes_be(n: &BigInt, len: usize) -> Vec<u8> {
        let (_, mut v) = n.to_bytes_le();
        v.resize(len, 0);
        v.reverse();
        v
    }

    pub fn bytes_be_to_bignum(bytes: &[u8]) -> BigInt {
        BigInt::from_bytes_be(num_bigint::Sign::Plus, bytes)
    }
}
