use argon2::{Algorithm, Argon2, Params, Version};
use serde::Serialize;
use zeroize::Zeroizing;

use super::{MIN_KEY_LEN, MIN_SALT_LEN};
use crate::error::DigestError;

/// Version of the Argon2 algorithm written into and accepted from encodings.
pub const ARGON2_VERSION: Version = Version::V0x13;

/// Cost parameters for one Argon2id derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DigestParams {
    /// Number of passes over memory.
    pub iterations: u32,
    /// Memory cost in KiB.
    pub memory: u32,
    /// Degree of parallelism (lanes).
    pub threads: u8,
    /// Output length in bytes.
    pub key_length: u32,
    /// Length of a freshly generated salt in bytes.
    pub salt_length: u32,
}

impl Default for DigestParams {
    fn default() -> Self {
        Self {
            iterations: 3,
            // 32 MiB
            memory: 32 * 1024,
            threads: 4,
            key_length: 32,
            salt_length: 16,
        }
    }
}

impl DigestParams {
    pub fn new(
        iterations: u32,
        memory: u32,
        threads: u8,
        key_length: u32,
        salt_length: u32,
    ) -> Result<Self, DigestError> {
        let params = Self {
            iterations,
            memory,
            threads,
            key_length,
            salt_length,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks the parameters against what Argon2id will accept.
    pub fn validate(&self) -> Result<(), DigestError> {
        if self.iterations < 1 {
            return Err(DigestError::InvalidParams("time cost must be >= 1"));
        }
        if self.threads < 1 {
            return Err(DigestError::InvalidParams("parallelism must be >= 1"));
        }
        if self.memory < 8 * u32::from(self.threads) {
            return Err(DigestError::InvalidParams(
                "memory cost must be at least 8 KiB per thread",
            ));
        }
        if (self.salt_length as usize) < MIN_SALT_LEN {
            return Err(DigestError::InvalidParams("salt must be at least 8 bytes"));
        }
        if (self.key_length as usize) < MIN_KEY_LEN {
            return Err(DigestError::InvalidParams("key must be at least 4 bytes"));
        }
        Ok(())
    }
}

/// Derives `params.key_length` bytes from `secret` and `salt` with Argon2id.
pub fn derive_key(
    secret: &[u8],
    salt: &[u8],
    params: &DigestParams,
) -> Result<Zeroizing<Vec<u8>>, DigestError> {
    tracing::debug!(
        m_cost = params.memory,
        t_cost = params.iterations,
        p_cost = params.threads,
        key_length = params.key_length,
        salt_length = salt.len(),
        "deriving argon2id digest"
    );

    let argon2_params = Params::new(
        params.memory,
        params.iterations,
        u32::from(params.threads),
        Some(params.key_length as usize),
    )
    .map_err(DigestError::KeyDerivation)?;

    let argon2 = Argon2::new(Algorithm::Argon2id, ARGON2_VERSION, argon2_params);

    let mut key = Zeroizing::new(vec![0u8; params.key_length as usize]);
    argon2
        .hash_password_into(secret, salt, &mut key)
        .map_err(DigestError::KeyDerivation)?;

    Ok(key)
}

#[cfg(test)]
pub(crate) fn cheap_params() -> DigestParams {
    DigestParams {
        iterations: 1,
        memory: 64,
        threads: 1,
        key_length: 32,
        salt_length: 16,
    }
}
