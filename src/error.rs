//! Errors returned by the FPE library

/// Errors surfaced by any context construction or encrypt/decrypt call.
///
/// Every variant corresponds to one of the three kinds spec'd for this
/// library: a bad argument, a failure of the underlying block cipher, or
/// an algorithm/key-size combination this build doesn't support.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad radix, length, key, tweak, digit, or alphabet.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The underlying block cipher primitive failed unexpectedly.
    #[error("internal cipher failure: {0}")]
    InternalCipher(String),

    /// A requested algorithm/key-bits combination isn't built into this
    /// library (e.g. SM4 with a 256-bit key).
    #[error("unsupported configuration: {0}")]
    Unsupported(String),
}

impl Error {
    pub fn invalid(why: impl Into<String>) -> Self {
        Error::InvalidArgument(why.into())
    }

    pub fn internal(why: impl Into<String>) -> Self {
        Error::InternalCipher(why.into())
    }

    pub fn unsupported(why: impl Into<String>) -> Self {
        Error::Unsupported(why.into())
    }
}
