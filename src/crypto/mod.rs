//! Cryptographic building blocks for digest records.
//!
//! Provides Argon2id key derivation, salt generation, and constant-time
//! comparison.

pub mod ct;
pub mod kdf;
pub mod random;

pub use ct::constant_time_eq;
pub use kdf::{ARGON2_VERSION, DigestParams, derive_key};
pub use random::generate_salt;

/// Shortest salt Argon2 accepts (8 bytes).
pub const MIN_SALT_LEN: usize = 8;
/// Shortest output Argon2 produces (4 bytes).
pub const MIN_KEY_LEN: usize = 4;
