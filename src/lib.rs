//! Argon2id password digests stored in the PHC string format.
//!
//! ```no_run
//! use phcnest::Argon2Digest;
//!
//! let mut digest = Argon2Digest::new();
//! digest.generate_digest(b"password123")?;
//! let encoded = digest.to_string();
//!
//! let restored = Argon2Digest::from_encoded(&encoded)?;
//! assert!(restored.compare("password123"));
//! # Ok::<(), phcnest::DigestError>(())
//! ```

mod crypto;
mod error;
mod format;

use std::fmt;
use std::str::FromStr;

pub use crate::crypto::DigestParams;
pub use crate::error::{DigestError, FieldError};
pub use crate::format::current_version;
use crate::format::{CostField, PhcString};
use zeroize::Zeroize;

/// An Argon2id digest together with the salt and cost parameters that
/// produced it.
#[derive(Debug, Clone)]
pub struct Argon2Digest {
    params: DigestParams,
    salt: Vec<u8>,
    digest: Vec<u8>,
}

impl Drop for Argon2Digest {
    fn drop(&mut self) {
        self.salt.zeroize();
        self.digest.zeroize();
    }
}

impl Default for Argon2Digest {
    fn default() -> Self {
        Self::new()
    }
}

impl Argon2Digest {
    /// Creates an empty record with the baseline cost parameters.
    pub fn new() -> Self {
        Self::with_params(DigestParams::default())
    }

    /// Creates an empty record with caller-supplied cost parameters.
    pub fn with_params(params: DigestParams) -> Self {
        Self {
            params,
            salt: Vec::new(),
            digest: Vec::new(),
        }
    }

    /// Hashes `secret` with the baseline parameters.
    pub fn from_secret(secret: &str) -> Result<Self, DigestError> {
        Self::from_secret_bytes(secret.as_bytes())
    }

    pub fn from_secret_bytes(secret: &[u8]) -> Result<Self, DigestError> {
        let mut digest = Self::new();
        digest.generate_digest(secret)?;
        Ok(digest)
    }

    /// Restores a record from its PHC encoding.
    ///
    /// Salt and key lengths are taken from the decoded bytes. The digest
    /// itself is not checked until [`compare`](Self::compare) is called.
    /// Neither the lengths nor the cost parameters are checked against any
    /// minimum or maximum policy.
    ///
    /// # Panics
    ///
    /// Decoding itself does not panic, but the cost parameters are trusted
    /// as written: a later [`compare`](Self::compare) on a record with an
    /// extreme `m=` value (e.g. `m=4294967295`) asks Argon2 for that much
    /// memory and aborts the process if the allocation fails. Validate
    /// [`params`](Self::params) before comparing untrusted encodings.
    pub fn from_encoded(encoded: &str) -> Result<Self, DigestError> {
        let (cost, salt, digest) = format::parse(encoded)?.into_parts();

        let params = DigestParams {
            iterations: cost.iterations,
            memory: cost.memory,
            threads: cost.threads,
            key_length: decoded_length(digest.len())?,
            salt_length: decoded_length(salt.len())?,
        };

        Ok(Self {
            params,
            salt,
            digest,
        })
    }

    /// Draws a fresh salt and derives the digest of `secret` with it.
    ///
    /// Any previous salt and digest are replaced.
    pub fn generate_digest(&mut self, secret: &[u8]) -> Result<(), DigestError> {
        self.params.validate()?;

        let salt = crypto::generate_salt(self.params.salt_length as usize)?;
        let key = crypto::derive_key(secret, &salt, &self.params)?;

        self.salt.zeroize();
        self.digest.zeroize();
        self.salt = salt;
        self.digest = key.to_vec();
        Ok(())
    }

    pub fn compare(&self, candidate: &str) -> bool {
        self.compare_bytes(candidate.as_bytes())
    }

    /// Re-derives `candidate` with the stored salt and parameters and
    /// compares the result to the stored digest in constant time.
    pub fn compare_bytes(&self, candidate: &[u8]) -> bool {
        match crypto::derive_key(candidate, &self.salt, &self.params) {
            Ok(provided) => crypto::constant_time_eq(&self.digest, &provided),
            Err(_) => false,
        }
    }

    /// Returns the canonical PHC encoding.
    pub fn encode(&self) -> String {
        let cost = CostField {
            memory: self.params.memory,
            iterations: self.params.iterations,
            threads: self.params.threads,
        };
        format::serialize(&PhcString::new(
            cost,
            self.salt.clone(),
            self.digest.clone(),
        ))
    }

    pub fn params(&self) -> &DigestParams {
        &self.params
    }

    pub fn iterations(&self) -> u32 {
        self.params.iterations
    }

    pub fn memory(&self) -> u32 {
        self.params.memory
    }

    pub fn threads(&self) -> u8 {
        self.params.threads
    }

    pub fn key_length(&self) -> u32 {
        self.params.key_length
    }

    pub fn salt_length(&self) -> u32 {
        self.params.salt_length
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Overrides the time cost. Takes effect on the next `generate_digest`.
    pub fn set_iterations(&mut self, iterations: u32) {
        self.params.iterations = iterations;
    }

    pub fn set_memory(&mut self, memory: u32) {
        self.params.memory = memory;
    }

    pub fn set_threads(&mut self, threads: u8) {
        self.params.threads = threads;
    }

    pub fn set_key_length(&mut self, key_length: u32) {
        self.params.key_length = key_length;
    }

    pub fn set_salt_length(&mut self, salt_length: u32) {
        self.params.salt_length = salt_length;
    }
}

/// Converts a decoded byte length into a length field.
fn decoded_length(len: usize) -> Result<u32, DigestError> {
    u32::try_from(len).map_err(|_| DigestError::InvalidHash)
}

impl fmt::Display for Argon2Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Argon2Digest {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_encoded(s)
    }
}
