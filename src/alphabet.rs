//! String <-> digit-array convenience layer (spec §4.6). Not part of the
//! core Feistel engines: a straightforward character <-> position lookup,
//! built once per [`crate::context::Context`] and reused for every call.

use crate::error::Error;
use crate::result::Result;

const DEFAULT_ALPHABET: &str =
    "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

struct Letter {
    val: char,
    pos: u16,
}

pub struct Alphabet {
    by_pos: Vec<char>,
    by_ltr: Vec<Letter>,
}

impl Alphabet {
    /// `radix` is the exact number of symbols the alphabet must supply.
    /// When `opt_s` is `None`, the first `radix` characters of the
    /// built-in default alphabet are used (a convenience, so callers
    /// exercising the digit API directly don't need to invent one for
    /// ASCII-range radixes). When `opt_s` is `Some`, its length must
    /// match `radix` exactly — silently dropping or ignoring extra
    /// characters would hide a caller mistake.
    pub fn new(opt_s: Option<&str>, radix: usize) -> Result<Alphabet> {
        let by_pos: Vec<char> = match opt_s {
            None => {
                if radix > DEFAULT_ALPHABET.len() {
                    return Err(Error::invalid(format!(
                        "no alphabet supplied and radix {} exceeds the default alphabet's {} characters",
                        radix, DEFAULT_ALPHABET.len()
                    )));
                }
                DEFAULT_ALPHABET.chars().take(radix).collect()
            }
            Some(s) => {
                let chars: Vec<char> = s.chars().collect();
                if chars.len() != radix {
                    return Err(Error::invalid(format!(
                        "alphabet must have exactly {} characters, got {}",
                        radix,
                        chars.len()
                    )));
                }
                chars
            }
        };

        let mut by_ltr = Vec::<Letter>::with_capacity(by_pos.len());
        for c in &by_pos {
            by_ltr.push(Letter {
                val: *c,
                pos: by_ltr.len() as u16,
            });
        }
        by_ltr.sort_by_key(|l| l.val);

        for i in 1..by_ltr.len() {
            if by_ltr[i].val == by_ltr[i - 1].val {
                return Err(Error::invalid(format!(
                    "duplicate character '{}' in alphabet",
                    by_ltr[i].val
                )));
            }
        }

        Ok(Alphabet { by_ltr, by_pos })
    }

    pub fn len(&self) -> usize {
        self.by_pos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pos.is_empty()
    }

    /// Character -> digit.
    pub fn ltr(&self, c: char) -> Result<u16> {
        match self.by_ltr.binary_search_by_key(&c, |l| l.val) {
            Ok(i) => Ok(self.by_ltr[i].pos),
            Err(_) => Err(Error::invalid(format!(
                "'{}' not found in alphabet",
                c
            ))),
        }
    }

    /// Digit -> character.
    pub fn pos(&self, i: u16) -> Result<char> {
        if i as usize >= self.len() {
            return Err(Error::invalid(format!("no character at position {}", i)));
        }
        Ok(self.by_pos[i as usize])
    }

    /// A whole string converted to a digit array in one pass.
    pub fn str_to_digits(&self, s: &str) -> Result<Vec<u16>> {
        s.chars().map(|c| self.ltr(c)).collect()
    }

    /// A whole digit array converted back to a string.
    pub fn digits_to_str(&self, digits: &[u16]) -> Result<String> {
        digits.iter().map(|&d| self.pos(d)).collect()
    }
}
