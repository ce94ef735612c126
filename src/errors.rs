//! Error types.

/// Alias for [`core::result::Result`] with the `rsa-oaep-crt` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Decryption error.
    ///
    /// Covers every integrity failure of the OAEP decode step. Which check
    /// failed is deliberately not reported.
    Decryption,

    /// Message too long.
    MessageTooLong,

    /// Invalid prime value.
    InvalidPrime,

    /// Invalid modulus.
    InvalidModulus,

    /// Invalid exponent.
    InvalidExponent,

    /// Invalid coefficient.
    InvalidCoefficient,

    /// Input length does not match the configured block size.
    InvalidPadLen,

    /// Invalid block size configuration.
    InvalidConfig,

    /// Internal error.
    Internal,
}

impl core::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Decryption => write!(f, "decryption error"),
            Error::MessageTooLong => write!(f, "message too long"),
            Error::InvalidPrime => write!(f, "invalid prime value"),
            Error::InvalidModulus => write!(f, "invalid modulus"),
            Error::InvalidExponent => write!(f, "invalid exponent"),
            Error::InvalidCoefficient => write!(f, "invalid coefficient"),
            Error::InvalidPadLen => write!(f, "input length does not match the block size"),
            Error::InvalidConfig => write!(f, "invalid block size configuration"),
            Error::Internal => write!(f, "internal error"),
        }
    }
}
