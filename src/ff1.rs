//! The FF1 algorithm (spec §4.3): 10 Feistel rounds driven by a CBC-MAC
//! PRF over a fixed 16-byte prefix `P` followed by a per-round message
//! `Q`. Digit 0 is the most significant digit throughout (the "standard"
//! order spec §4.2 defines for FF1, as opposed to FF3/FF3-1's reversed
//! order in [`crate::ff3_common`]).

use crate::ffx::{CipherType, Ffx};
use crate::result::Result;

use byteorder::ByteOrder;
use num_traits::Euclid;

const ROUNDS: u8 = 10;

pub(crate) fn cipher(
    ffx: &Ffx,
    tweak: &[u8],
    x: &[u16],
    which: CipherType,
) -> Result<Vec<u16>> {
    let radix = ffx.get_radix();
    let blksz = ffx.get_cipher_block_size();
    let n = x.len();

    // (step 1) FF1 uses the floor split: u is the smaller-or-equal half.
    let u_len = n / 2;
    let v_len = n - u_len;

    // (step 2) the halves are kept as bignums for the duration of the
    // algorithm and only rendered back to digits at the end.
    let mut na = ffx.digits_to_bignum(&x[..u_len]);
    let mut nb = ffx.digits_to_bignum(&x[u_len..]);

    // (step 3) bytes needed to hold NUM_r(B) exactly.
    let b = ((((radix as f64).log2() * (v_len as f64)).ceil() as usize) + 7) / 8;
    // (step 4) PRF output length in bytes.
    let d = 4 * ((b + 3) / 4) + 4;

    // (step 5) the fixed prefix P, 16 bytes, followed by Q sized so that
    // |P| + |Q| is a multiple of the block size.
    let mut p = vec![0u8; 16 + ((tweak.len() + 1 + b + (blksz - 1)) / blksz) * blksz];
    let mut r = vec![0u8; ((d + (blksz - 1)) / blksz) * blksz];

    p[0] = 1;
    p[1] = 2;
    byteorder::BigEndian::write_u32(&mut p[2..6], radix as u32);
    p[2] = 1;
    p[6] = ROUNDS;
    p[7] = u_len as u8;
    byteorder::BigEndian::write_u32(&mut p[8..12], n as u32);
    byteorder::BigEndian::write_u32(&mut p[12..16], tweak.len() as u32);

    {
        // (step 6i, partial) the tweak, then zero padding, then the
        // round-varying suffix filled in below.
        let q = &mut p[16..];
        q[0..tweak.len()].copy_from_slice(tweak);
    }

    // (step 6v/6vi, partial) radix^u and radix^v, swapped for decryption
    // so the loop always reduces the "current" half by the modulus that
    // matches its length.
    let mut mu: num_bigint::BigInt = (radix as u32).into();
    mu = mu.pow(u_len as u32);
    let mut mv = mu.clone();
    if u_len != v_len {
        mv *= radix as u32;
    }

    if let CipherType::Decrypt = which {
        std::mem::swap(&mut na, &mut nb);
        std::mem::swap(&mut mu, &mut mv);
    }

    for i in 0..ROUNDS {
        {
            let q = &mut p[16..];
            let q_len = q.len();

            match which {
                CipherType::Encrypt => q[q_len - b - 1] = i,
                CipherType::Decrypt => q[q_len - b - 1] = ROUNDS - 1 - i,
            }

            let bytes = Ffx::bignum_to_bytes_be(&nb, b);
            q[q_len - b..].copy_from_slice(&bytes);
        }

        // (step 6ii) CBC-MAC the first block of output.
        ffx.prf(&p, &mut r[..blksz])?;

        // (step 6iii) extend to d bytes: R || ciph(R^1) || ciph(R^2) || ...
        for j in 1..r.len() / blksz {
            let (s, dst) = r.split_at_mut(blksz);
            let l = (j - 1) * blksz;

            let w = byteorder::BigEndian::read_u32(&s[blksz - 4..]);
            byteorder::BigEndian::write_u32(&mut s[blksz - 4..], w ^ j as u32);
            ffx.ciph(s, &mut dst[l..l + blksz])?;
            byteorder::BigEndian::write_u32(&mut s[blksz - 4..], w);
        }

        // (step 6iv)
        let y = Ffx::bytes_be_to_bignum(&r[..d]);

        // (step 6vi, partial)
        match which {
            CipherType::Encrypt => na += y,
            CipherType::Decrypt => na -= y,
        }
        na = na.rem_euclid(&mu);

        // (step 6v, partial)
        std::mem::swap(&mut mu, &mut mv);
        // (step 6viii/ix; 6vii is unnecessary — B never needs conversion
        // back to digits until the very end)
        std::mem::swap(&mut na, &mut nb);
    }

    if let CipherType::Decrypt = which {
        std::mem::swap(&mut na, &mut nb);
    }

    // (step 7)
    let mut out = ffx.bignum_to_digits(&na, u_len);
    out.extend(ffx.bignum_to_digits(&nb, v_len));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::Algo;
    use crate::ffx::MAX_TEXT_LEN;

    fn ffx(key: &[u8], radix: usize) -> Ffx {
        Ffx::new(Algo::Aes, key, radix, 2, MAX_TEXT_LEN, 0, 0).unwrap()
    }

    fn digits(s: &str, radix: u32) -> Vec<u16> {
        s.chars().map(|c| c.to_digit(radix).unwrap() as u16).collect()
    }

    #[test]
    fn nist1() {
        let key = [
            0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf,
            0x4f, 0x3c,
        ];
        let f = ffx(&key, 10);
        let pt = digits("0123456789", 10);
        let ct = cipher(&f, &[], &pt, CipherType::Encrypt).unwrap();
        assert_eq!(ct, digits("2433477484", 10));

        let back = cipher(&f, &[], &ct, CipherType::Decrypt).unwrap();
        assert_eq!(back, pt);
    }

    #[test]
    fn nist2_with_tweak() {
        let key = [
            0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf,
            0x4f, 0x3c,
        ];
        let f = ffx(&key, 10);
        let twk = [0x39, 0x38, 0x37, 0x36, 0x35, 0x34, 0x33, 0x32, 0x31, 0x30];
        let pt = digits("0123456789", 10);

        let ct = cipher(&f, &twk, &pt, CipherType::Encrypt).unwrap();
        assert_eq!(ct, digits("6124200773", 10));

        let back = cipher(&f, &twk, &ct, CipherType::Decrypt).unwrap();
        assert_eq!(back, pt);
    }

    #[test]
    fn nist3_radix36() {
        let key = [
            0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf,
            0x4f, 0x3c,
        ];
        let f = ffx(&key, 36);
        let twk = [
            0x37, 0x37, 0x37, 0x37, 0x70, 0x71, 0x72, 0x73, 0x37, 0x37, 0x37,
        ];
        let pt = digits("0123456789abcdefghi", 36);

        let ct = cipher(&f, &twk, &pt, CipherType::Encrypt).unwrap();
        assert_eq!(ct, digits("a9tv40mll9kdu509eum", 36));

        let back = cipher(&f, &twk, &ct, CipherType::Decrypt).unwrap();
        assert_eq!(back, pt);
    }

    #[test]
    fn nist4_key192() {
        let key = [
            0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf,
            0x4f, 0x3c, 0xef, 0x43, 0x59, 0xd8, 0xd5, 0x80, 0xaa, 0x4f,
        ];
        let f = ffx(&key, 10);
        let pt = digits("0123456789", 10);
        let ct = cipher(&f, &[], &pt, CipherType::Encrypt).unwrap();
        assert_eq!(ct, digits("2830668132", 10));
        let back = cipher(&f, &[], &ct, CipherType::Decrypt).unwrap();
        assert_eq!(back, pt);
    }

    #[test]
    fn nist7_key256() {
        let key = [
            0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf,
            0x4f, 0x3c, 0xef, 0x43, 0x59, 0xd8, 0xd5, 0x80, 0xaa, 0x4f, 0x7f, 0x03, 0x6d, 0x6f,
            0x04, 0xfc, 0x6a, 0x94,
        ];
        let f = ffx(&key, 10);
        let pt = digits("0123456789", 10);
        let ct = cipher(&f, &[], &pt, CipherType::Encrypt).unwrap();
        assert_eq!(ct, digits("6657667009", 10));
        let back = cipher(&f, &[], &ct, CipherType::Decrypt).unwrap();
        assert_eq!(back, pt);
    }

    #[test]
    fn minimum_length_two() {
        let f = ffx(&[0; 16], 10);
        let pt: Vec<u16> = vec![3, 7];
        let ct = cipher(&f, &[], &pt, CipherType::Encrypt).unwrap();
        let back = cipher(&f, &[], &ct, CipherType::Decrypt).unwrap();
        assert_eq!(back, pt);
    }

    #[test]
    fn radix_65536_roundtrip() {
        let f = ffx(&[0; 16], 65_536);
        let pt: Vec<u16> = vec![0, 65_535, 1234, 6, 7, 8];
        let ct = cipher(&f, &[], &pt, CipherType::Encrypt).unwrap();
        assert_ne!(ct, pt);
        let back = cipher(&f, &[], &ct, CipherType::Decrypt).unwrap();
        assert_eq!(back, pt);
    }
}
