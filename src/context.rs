//! The dispatcher (spec §4.6): mode selection and a uniform digit-array
//! `encrypt`/`decrypt` surface over the three engines, plus a string
//! convenience layer bound to an [`Alphabet`].
//!
//! [`Context`] is the stable entry point spec §3's Data Model describes:
//! built once from a key/mode/radix triple, reused for many calls, and
//! scrubbed of key material on drop (spec §5, §7).

use crate::alphabet::Alphabet;
use crate::cipher::Algo;
use crate::error::Error;
use crate::ff3_common;
use crate::ffx::{CipherType, Ffx, MAX_TEXT_LEN};
use crate::result::Result;
use crate::{ff1, ff3, ff3_1};

use zeroize::Zeroize;

/// Selects which of the three NIST Feistel constructions a [`Context`]
/// runs (spec §2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Ff1,
    Ff3,
    Ff3_1,
}

/// An immutable FPE configuration: mode, bound block cipher, radix, and
/// (optionally) a default tweak and a string alphabet. Create once, use
/// many times (spec §3); dropping it zeroes the raw key bytes it was
/// constructed with.
pub struct Context {
    mode: Mode,
    ffx: Ffx,
    alphabet: Alphabet,
    default_tweak: Option<Vec<u8>>,
    raw_key: Vec<u8>,
}

impl Context {
    /// Builds a context for `mode` over `algo`/`key`/`radix`.
    ///
    /// `tweak` is an optional default used by `encrypt`/`decrypt` calls
    /// that don't supply their own. `alphabet` is an optional custom
    /// alphabet for the string layer; `None` uses (a prefix of) the
    /// built-in default alphabet, same convenience the digit-only caller
    /// never needs but the string layer always does.
    ///
    /// FF3 and FF3-1 bind the cipher on the byte-reversed key (spec
    /// §4.1); FF1 binds it as given. The *original* key (not reversed)
    /// is what gets zeroed on drop, since that's what the caller handed
    /// us and what they'd expect scrubbed.
    pub fn new(
        mode: Mode,
        algo: Algo,
        key: &[u8],
        radix: usize,
        tweak: Option<&[u8]>,
        alphabet: Option<&str>,
    ) -> Result<Context> {
        let (mintwk, maxtwk) = match mode {
            Mode::Ff1 => (0, 0),
            Mode::Ff3 | Mode::Ff3_1 => (7, 8),
        };
        let maxtxt = match mode {
            Mode::Ff1 => MAX_TEXT_LEN,
            Mode::Ff3 | Mode::Ff3_1 => ff3_common::max_text_len(radix),
        };

        let bound_key: Vec<u8> = match mode {
            Mode::Ff1 => key.to_vec(),
            Mode::Ff3 | Mode::Ff3_1 => key.iter().rev().copied().collect(),
        };

        let ffx = Ffx::new(algo, &bound_key, radix, 2, maxtxt, mintwk, maxtwk)?;
        let alphabet = Alphabet::new(alphabet, radix)?;

        Ok(Context {
            mode,
            ffx,
            alphabet,
            default_tweak: tweak.map(|t| t.to_vec()),
            raw_key: key.to_vec(),
        })
    }

    fn resolve_tweak<'a>(&'a self, t: Option<&'a [u8]>) -> &'a [u8] {
        match t {
            Some(t) => t,
            None => self.default_tweak.as_deref().unwrap_or(&[]),
        }
    }

    fn dispatch(&self, x: &[u16], tweak: Option<&[u8]>, which: CipherType) -> Result<Vec<u16>> {
        self.ffx.validate_text_length(x.len())?;
        self.ffx.validate_digits(x)?;

        let t = self.resolve_tweak(tweak);
        self.ffx.validate_tweak_length(t.len())?;

        match self.mode {
            Mode::Ff1 => ff1::cipher(&self.ffx, t, x, which),
            Mode::Ff3 => ff3::cipher(&self.ffx, t, x, which),
            Mode::Ff3_1 => ff3_1::cipher(&self.ffx, t, x, which),
        }
    }

    /// Encrypts a digit array (spec §6 digit API `encrypt`).
    pub fn encrypt(&self, x: &[u16], tweak: Option<&[u8]>) -> Result<Vec<u16>> {
        self.dispatch(x, tweak, CipherType::Encrypt)
    }

    /// Decrypts a digit array (spec §6 digit API `decrypt`).
    pub fn decrypt(&self, y: &[u16], tweak: Option<&[u8]>) -> Result<Vec<u16>> {
        self.dispatch(y, tweak, CipherType::Decrypt)
    }

    /// Encrypts a string through this context's bound alphabet (spec
    /// §6 string API). Every character must appear in the alphabet.
    pub fn encrypt_str(&self, pt: &str, tweak: Option<&[u8]>) -> Result<String> {
        let digits = self.alphabet.str_to_digits(pt)?;
        let ct = self.encrypt(&digits, tweak)?;
        self.alphabet.digits_to_str(&ct)
    }

    /// Decrypts a string through this context's bound alphabet.
    pub fn decrypt_str(&self, ct: &str, tweak: Option<&[u8]>) -> Result<String> {
        let digits = self.alphabet.str_to_digits(ct)?;
        let pt = self.decrypt(&digits, tweak)?;
        self.alphabet.digits_to_str(&pt)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn radix(&self) -> usize {
        self.ffx.get_radix()
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        self.raw_key.zeroize();
    }
}

/// One-shot digit-array encrypt: init + `encrypt` + (implicit) free.
#[allow(clippy::too_many_arguments)]
pub fn encrypt(
    mode: Mode,
    algo: Algo,
    key: &[u8],
    radix: usize,
    tweak: Option<&[u8]>,
    x: &[u16],
) -> Result<Vec<u16>> {
    Context::new(mode, algo, key, radix, None, None)?.encrypt(x, tweak)
}

/// One-shot digit-array decrypt: init + `decrypt` + (implicit) free.
#[allow(clippy::too_many_arguments)]
pub fn decrypt(
    mode: Mode,
    algo: Algo,
    key: &[u8],
    radix: usize,
    tweak: Option<&[u8]>,
    y: &[u16],
) -> Result<Vec<u16>> {
    Context::new(mode, algo, key, radix, None, None)?.decrypt(y, tweak)
}

/// One-shot string encrypt, unknown alphabet characters surface the
/// same [`Error::InvalidArgument`] sentinel spec §6 calls out for both
/// the digit and string APIs.
#[allow(clippy::too_many_arguments)]
pub fn encrypt_str(
    mode: Mode,
    algo: Algo,
    key: &[u8],
    radix: usize,
    tweak: Option<&[u8]>,
    pt: &str,
    alphabet: Option<&str>,
) -> Result<String> {
    Context::new(mode, algo, key, radix, None, alphabet)?.encrypt_str(pt, tweak)
}

/// One-shot string decrypt.
#[allow(clippy::too_many_arguments)]
pub fn decrypt_str(
    mode: Mode,
    algo: Algo,
    key: &[u8],
    radix: usize,
    tweak: Option<&[u8]>,
    ct: &str,
    alphabet: Option<&str>,
) -> Result<String> {
    Context::new(mode, algo, key, radix, None, alphabet)?.decrypt_str(ct, tweak)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ff1_digit_roundtrip() {
        let key = [0x2bu8, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f, 0x3c];
        let ctx = Context::new(Mode::Ff1, Algo::Aes, &key, 10, None, None).unwrap();
        let pt: Vec<u16> = vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
        let ct = ctx.encrypt(&pt, None).unwrap();
        assert_ne!(ct, pt);
        assert_eq!(ctx.decrypt(&ct, None).unwrap(), pt);
    }

    #[test]
    fn ff3_1_string_roundtrip_with_default_tweak() {
        let key = [
            0xad, 0x41, 0xec, 0x5d, 0x23, 0x56, 0xde, 0xae, 0x53, 0xae, 0x76, 0xf5, 0x0b, 0x4b,
            0xa6, 0xd2,
        ];
        let twk = [0xcf, 0x29, 0xda, 0x1e, 0x18, 0xd9, 0x70];
        let ctx = Context::new(Mode::Ff3_1, Algo::Aes, &key, 10, Some(&twk), Some("0123456789")).unwrap();

        let ct = ctx.encrypt_str("6520935496", None).unwrap();
        assert_ne!(ct, "6520935496");
        assert_eq!(ctx.decrypt_str(&ct, None).unwrap(), "6520935496");
    }

    #[test]
    fn per_call_tweak_overrides_default() {
        let key = [0u8; 16];
        let default_twk = [0u8; 7];
        let other_twk = [0xffu8; 7];
        let ctx = Context::new(Mode::Ff3_1, Algo::Aes, &key, 10, Some(&default_twk), None).unwrap();

        let pt: Vec<u16> = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let with_default = ctx.encrypt(&pt, None).unwrap();
        let with_other = ctx.encrypt(&pt, Some(&other_twk)).unwrap();
        assert_ne!(with_default, with_other);
    }

    #[test]
    fn unknown_alphabet_character_is_an_error() {
        let key = [0u8; 16];
        let ctx = Context::new(Mode::Ff1, Algo::Aes, &key, 10, None, Some("0123456789")).unwrap();
        assert!(ctx.encrypt_str("12345abcde", None).is_err());
    }

    #[test]
    fn rejects_digit_ge_radix() {
        let key = [0u8; 16];
        let ctx = Context::new(Mode::Ff1, Algo::Aes, &key, 10, None, None).unwrap();
        let bad: Vec<u16> = vec![0, 1, 2, 10, 4, 5, 6, 7];
        assert!(matches!(ctx.encrypt(&bad, None), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn rejects_too_short_input() {
        let key = [0u8; 16];
        let ctx = Context::new(Mode::Ff1, Algo::Aes, &key, 10, None, None).unwrap();
        assert!(ctx.encrypt(&[5u16], None).is_err());
    }

    #[test]
    fn ff3_1_rejects_six_byte_tweak() {
        let key = [0u8; 16];
        let ctx = Context::new(Mode::Ff3_1, Algo::Aes, &key, 10, None, None).unwrap();
        let pt: Vec<u16> = vec![1, 2, 3, 4, 5, 6, 7, 8];
        assert!(ctx.encrypt(&pt, Some(&[0u8; 6])).is_err());
    }

    #[test]
    fn rejects_unsupported_key_bits() {
        let key = [0u8; 8];
        assert!(Context::new(Mode::Ff1, Algo::Aes, &key, 10, None, None).is_err());
    }

    #[test]
    fn sm4_roundtrip() {
        let key = [0u8; 16];
        let ctx = Context::new(Mode::Ff1, Algo::Sm4, &key, 10, None, None).unwrap();
        let pt: Vec<u16> = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let ct = ctx.encrypt(&pt, None).unwrap();
        assert_eq!(ctx.decrypt(&ct, None).unwrap(), pt);
    }

    #[test]
    fn context_drop_runs_without_panicking() {
        // Exercises the `Drop for Context` path (zeroizing `raw_key`);
        // actually observing the zeroed bytes would require reading
        // freed memory, which `zeroize` itself already has tests for.
        let key = vec![0xAAu8; 16];
        let ctx = Context::new(Mode::Ff1, Algo::Aes, &key, 10, None, None).unwrap();
        drop(ctx);
    }
}
