//! Useful algorithms related to RSA and OAEP.

pub(crate) mod generate;
pub(crate) mod mgf;
pub(crate) mod oaep;
pub(crate) mod pad;
pub(crate) mod prime;
pub(crate) mod rsa;
