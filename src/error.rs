use std::num::ParseIntError;

use thiserror::Error;

/// Why a single `key=value` field of an encoded digest failed to parse.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("expected `{0}=` prefix")]
    MissingPrefix(&'static str),

    #[error(transparent)]
    Int(#[from] ParseIntError),
}

#[derive(Debug, Error)]
pub enum DigestError {
    #[error("OS random generator unavailable: {0}")]
    RandomSource(getrandom::Error),

    #[error("the encoded value is not in a supported format")]
    InvalidHash,

    #[error("incompatible version of argon2: found {found}, expected {expected}")]
    IncompatibleVersion { found: i64, expected: u32 },

    #[error("malformed version field")]
    InvalidVersionField(#[source] FieldError),

    #[error("malformed parameter field: expected m=<int>,t=<int>,p=<int>")]
    InvalidParamsField,

    #[error("malformed memory cost")]
    InvalidMemory(#[source] FieldError),

    #[error("malformed time cost")]
    InvalidIterations(#[source] FieldError),

    #[error("malformed parallelism")]
    InvalidThreads(#[source] FieldError),

    #[error("malformed salt encoding")]
    InvalidSalt(#[source] base64::DecodeError),

    #[error("malformed digest encoding")]
    InvalidDigest(#[source] base64::DecodeError),

    #[error("invalid argon2 parameters: {0}")]
    InvalidParams(&'static str),

    #[error("argon2 key derivation failed: {0}")]
    KeyDerivation(argon2::Error),
}
