//! The 8-round Feistel loop shared by FF3 and FF3-1 (spec §4.4/§4.5): the
//! only difference between the two modes is how the 8-byte tweak buffer
//! is split into `Tl`/`Tr` (plain halves for FF3, nibble-split for
//! FF3-1). Everything else — the per-round 16-byte buffer layout, the
//! double byte-reversal around the cipher call, the low-to-high digit
//! addition, and the swap discipline — is identical, so it lives here
//! once instead of twice.

use crate::ffx::{CipherType, Ffx};
use crate::result::Result;

use num_bigint::BigInt;
use num_traits::Euclid;

pub(crate) const ROUNDS: u8 = 8;

/// Runs the shared FF3-family round loop over `inp`, given the tweak
/// already split into 4-byte `tl`/`tr` halves in the mode-specific way.
pub(crate) fn cipher_digits(
    ffx: &Ffx,
    inp: &[u16],
    tl_in: [u8; 4],
    tr_in: [u8; 4],
    which: CipherType,
) -> Result<Vec<u16>> {
    let n = inp.len();
    // (step 1) FF3/FF3-1 use the ceiling split: u is the larger half.
    let v_len = n / 2;
    let u_len = n - v_len;

    let a = &inp[..u_len];
    let b = &inp[u_len..];

    // (step 2) the reversed digit order means A/B are taken as-is; no
    // manual slice reversal is needed the way a char-based implementation
    // would need it.
    let mut na = ffx.digits_to_bignum_rev(a);
    let mut nb = ffx.digits_to_bignum_rev(b);

    let radix = BigInt::from(ffx.get_radix() as u32);
    let mut mv = radix.pow(v_len as u32);
    let mut mu = mv.clone();
    if v_len != u_len {
        mu *= &radix;
    }

    let mut tl = tl_in;
    let mut tr = tr_in;

    if let CipherType::Decrypt = which {
        std::mem::swap(&mut na, &mut nb);
        std::mem::swap(&mut mu, &mut mv);
        std::mem::swap(&mut tl, &mut tr);
    }

    for i in 0..ROUNDS {
        // even round -> Tr, odd round -> Tl (spec §4.4 "Tweak half selection")
        let tw = if i % 2 == 0 { tr } else { tl };

        let mut w_in = [0u8; 16];
        w_in[..4].copy_from_slice(&tw);
        match which {
            CipherType::Encrypt => w_in[3] ^= i,
            CipherType::Decrypt => w_in[3] ^= ROUNDS - 1 - i,
        }
        // bytes 4..16 hold NUM_r^rev(B) clamped to 12 bytes (b <= 12, spec §4.4).
        let b_bytes = Ffx::bignum_to_bytes_be(&nb, 12);
        w_in[4..16].copy_from_slice(&b_bytes);
        w_in.reverse();

        let mut w_out = [0u8; 16];
        ffx.ciph(&w_in, &mut w_out)?;
        w_out.reverse();

        let y = Ffx::bytes_be_to_bignum(&w_out);

        match which {
            CipherType::Encrypt => na += &y,
            CipherType::Decrypt => na -= &y,
        }
        na = na.rem_euclid(&mu);

        std::mem::swap(&mut mu, &mut mv);
        std::mem::swap(&mut na, &mut nb);
    }

    if let CipherType::Decrypt = which {
        std::mem::swap(&mut na, &mut nb);
    }

    let mut out = ffx.bignum_to_digits_rev(&na, u_len);
    out.extend(ffx.bignum_to_digits_rev(&nb, v_len));
    Ok(out)
}

/// `floor(192 / log2(radix))`, the NIST maximum text length for FF3/FF3-1
/// (`2 * log_radix(2**96)`), capped by [`crate::ffx::MAX_TEXT_LEN`] in `Ffx::new`.
pub(crate) fn max_text_len(radix: usize) -> usize {
    (192f64 / (radix as f64).log2()).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::Algo;

    #[test]
    fn roundtrip() {
        let ffx = Ffx::new(Algo::Aes, &[0; 16], 10, 2, max_text_len(10), 8, 8).unwrap();
        let inp: Vec<u16> = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let tl = [0u8; 4];
        let tr = [0u8; 4];

        let ct = cipher_digits(&ffx, &inp, tl, tr, CipherType::Encrypt).unwrap();
        let pt = cipher_digits(&ffx, &ct, tl, tr, CipherType::Decrypt).unwrap();
        assert_eq!(pt, inp);
    }
}
