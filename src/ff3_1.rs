//! The FF3-1 algorithm (spec §4.5): identical to FF3 (see [`crate::ff3`])
//! except the 56-bit tweak is split at the nibble rather than at the
//! byte, separating the tweak domains of the two halves cleanly enough
//! to close the distinguishing attack that got FF3 deprecated.

use crate::error::Error;
use crate::ffx::{CipherType, Ffx};
use crate::result::Result;

pub(crate) use crate::ff3_common::max_text_len;

/// Splits a tweak into FF3-1's nibble-separated `Tl`/`Tr` halves.
///
/// A canonical tweak is exactly 7 bytes. An 8-byte tweak is also
/// accepted for interop with tools that pad FF3-1 tweaks out to a full
/// word: byte 7 is simply discarded and bytes 0..7 are split as usual
/// (spec §3's parenthetical about discarding "the low nibble of byte 3"
/// describes the same 7-byte split applied after truncation, not a
/// second, different split — there is exactly one nibble-split rule,
/// and accepting 8 bytes only changes which input bytes feed it).
///
/// `Tl = T[0..3] || (T[3] & 0xF0)`, `Tr = (T[3] & 0x0F) || T[4..7]` (spec
/// §4.5): `Tr`'s leading byte carries `T[3]`'s low nibble unshifted, in
/// the low-order position, with `T[4..7]` following it.
fn split_tweak(t: &[u8]) -> Result<([u8; 4], [u8; 4])> {
    let t7: [u8; 7] = match t.len() {
        7 => t.try_into().unwrap(),
        8 => t[..7].try_into().unwrap(),
        n => {
            return Err(Error::invalid(format!(
                "invalid tweak length; FF3-1 expects 7 bytes (or 8, with the last byte discarded), got {n}"
            )))
        }
    };

    let mut tl = [0u8; 4];
    let mut tr = [0u8; 4];
    tl[..3].copy_from_slice(&t7[..3]);
    tl[3] = t7[3] & 0xf0;
    tr[0] = t7[3] & 0x0f;
    tr[1..4].copy_from_slice(&t7[4..7]);
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
