//! The FF3 algorithm (spec §4.4), deprecated by NIST in favor of FF3-1 but
//! kept here as a first-class mode since spec §2 lists it alongside FF3-1.
//!
//! FF3 uses a plain 8-byte tweak split into two 4-byte halves, `Tl` and
//! `Tr`, with no nibble-level mixing — that's the only thing FF3-1
//! changes (see [`crate::ff3_1`]). A 7-byte tweak is accepted and
//! zero-padded into 8 on the right (spec §3, a backward-compatibility
//! allowance NIST's FF3 itself does not make).

use crate::error::Error;
use crate::ffx::{CipherType, Ffx};
use crate::result::Result;

pub(crate) use crate::ff3_common::max_text_len;

fn split_tweak(t: &[u8]) -> Result<([u8; 4], [u8; 4])> {
    let mut t8 = [0u8; 8];
    match t.len() {
        7 => t8[..7].copy_from_slice(t),
        8 => t8.copy_from_slice(t),
        n => {
            return Err(Error::invalid(format!(
                "invalid tweak length; FF3 expects 7 or 8 bytes, got {n}"
            )))
        }
    }

    let mut tl = [0u8; 4];
    let mut tr = [0u8; 4];
    tl.copy_from_slice(&t8[0..4]);
    tr.copy_from_slice(&t8[4..8]);
    Ok((tl, tr))
}

pub(crate) fn cipher(
    ffx: &Ffx,
    tweak: &[u8],
    x: &[u16],
    which: CipherType,
) -> Result<Vec<u16>> {
    let (tl, tr) = split_tweak(tweak)?;
    crate::ff3_common::cipher_digits(ffx, x, tl, tr, which)
}
