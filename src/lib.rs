//! Format-preserving encryption
//!
//! Implements the NIST-specified FF1 and FF3-1 Feistel constructions, plus
//! the deprecated FF3 predecessor, over a 128/192/256-bit AES or 128-bit
//! SM4 block cipher. Format-preserving encryption, in short, means both
//! the plaintext and ciphertext consist of the same alphabet of symbols:
//! a 16-digit decimal string encrypts to another 16-digit decimal string,
//! a credit-card-shaped input stays credit-card-shaped.
//!
//! [`Context`] is the stable entry point: built once from a mode, block
//! cipher choice, key and radix, then reused for many `encrypt`/`decrypt`
//! calls over either digit arrays (`&[u16]`) or, via a bound [`Alphabet`],
//! plain strings.
//!
//! # Example
//! ```rust
//! use fpe::{Algo, Context, Mode};
//!
//! let ctx = Context::new(
//!     Mode::Ff1,
//!     Algo::Aes,
//!     &[
//!         0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6,
//!         0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f, 0x3c,
//!     ], // the encryption key
//!     10,   // radix: number of symbols in the alphabet
//!     None, // no default tweak
//!     None, // use (the first 10 characters of) the default alphabet
//! )
//! .unwrap();
//!
//! // this is the first NIST-specified test vector for FF1.
//! let pt = "0123456789";
//!
//! let ct = ctx.encrypt_str(pt, None).unwrap();
//! assert_eq!(ct, "2433477484");
//! assert_eq!(ctx.decrypt_str(&ct, None).unwrap(), pt);
//! ```

pub(crate) mod alphabet;
pub(crate) mod cipher;
pub mod context;
pub mod error;
pub(crate) mod ff1;
pub(crate) mod ff3;
pub(crate) mod ff3_1;
pub(crate) mod ff3_common;
pub(crate) mod ffx;

pub use alphabet::Alphabet;
pub use cipher::Algo;
pub use context::{Context, Mode};
pub use error::Error;

/// Results returned by the FPE library.
pub mod result {
    pub type Result<T> = std::result::Result<T, crate::error::Error>;
}
