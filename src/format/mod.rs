//! PHC string encoding for Argon2id digests.
//!
//! Format, as written by the reference `argon2` command-line utility:
//! ```text
//! $argon2id$v=<version>$m=<memory>,t=<iterations>,p=<threads>$<salt>$<digest>
//! ```
//! Salt and digest are unpadded standard base64.

use base64::{Engine as _, engine::general_purpose::STANDARD_NO_PAD};

use crate::crypto::ARGON2_VERSION;
use crate::error::DigestError;

pub mod params;

pub use params::CostField;

/// Algorithm identifier written in the first segment.
pub const ALGORITHM_ID: &str = "argon2id";

/// Version number accepted by the decoder and written by the encoder.
pub fn current_version() -> u32 {
    ARGON2_VERSION as u32
}

/// A decoded PHC string with every field in its typed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhcString {
    version: u32,
    cost: CostField,
    salt: Vec<u8>,
    digest: Vec<u8>,
}

impl PhcString {
    pub fn new(cost: CostField, salt: Vec<u8>, digest: Vec<u8>) -> Self {
        Self {
            version: current_version(),
            cost,
            salt,
            digest,
        }
    }

    pub fn into_parts(self) -> (CostField, Vec<u8>, Vec<u8>) {
        (self.cost, self.salt, self.digest)
    }
}

/// Parses an encoded digest.
///
/// # Errors
///
/// - `InvalidHash` if the string does not have exactly six `$` segments
/// - `InvalidVersionField` / `IncompatibleVersion` for the version segment
/// - one of the cost field variants for the parameter segment
/// - `InvalidSalt` / `InvalidDigest` for malformed base64
pub fn parse(encoded: &str) -> Result<PhcString, DigestError> {
    let segments: Vec<&str> = encoded.split('$').collect();
    let [_, _algorithm, version, cost, salt, digest] = segments[..] else {
        return Err(DigestError::InvalidHash);
    };

    let found: i64 =
        params::parse_field("v", version).map_err(DigestError::InvalidVersionField)?;
    if found != i64::from(current_version()) {
        return Err(DigestError::IncompatibleVersion {
            found,
            expected: current_version(),
        });
    }

    let cost = CostField::parse(cost)?;

    let salt = STANDARD_NO_PAD
        .decode(salt)
        .map_err(DigestError::InvalidSalt)?;
    let digest = STANDARD_NO_PAD
        .decode(digest)
        .map_err(DigestError::InvalidDigest)?;

    Ok(PhcString {
        version: current_version(),
        cost,
        salt,
        digest,
    })
}

/// Serializes a PHC string. Never fails.
pub fn serialize(phc: &PhcString) -> String {
    format!(
        "${}$v={}${}${}${}",
        ALGORITHM_ID,
        phc.version,
        phc.cost.encode(),
        STANDARD_NO_PAD.encode(&phc.salt),
        STANDARD_NO_PAD.encode(&phc.digest),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldError;

    const SAMPLE: &str = "$argon2id$v=19$m=65536,t=3,p=2$c29tZXNhbHQ$RdescudvJCsgt3ub+b+dWRWJTmaaJObG";

    fn sample_cost() -> CostField {
        CostField {
            memory: 65536,
            iterations: 3,
            threads: 2,
        }
    }

    #[test]
    fn parses_reference_encoding() {
        let phc = parse(SAMPLE).unwrap();
        assert_eq!(phc.version, 19);
        assert_eq!(phc.cost, sample_cost());
        assert_eq!(phc.salt, b"somesalt");
        assert_eq!(phc.digest.len(), 24);
        assert_eq!(serialize(&phc), SAMPLE);
    }

    #[test]
    fn serialize_uses_fixed_layout() {
        let phc = PhcString::new(sample_cost(), vec![0xfb; 16], vec![0xff; 32]);
        let encoded = serialize(&phc);

        assert!(encoded.starts_with("$argon2id$v=19$m=65536,t=3,p=2$"));
        assert_eq!(encoded.split('$').count(), 6);
        let segments: Vec<&str> = encoded.split('$').collect();
        assert!(segments[4].contains('+') || segments[4].contains('/'));
        assert!(!segments[4].ends_with('='));
        assert!(!segments[5].ends_with('='));
    }

    #[test]
    fn wrong_segment_count_is_invalid_hash() {
        for encoded in [
            "",
            "argon2id",
            "$argon2id$v=19$m=65536,t=3,p=2$c29tZXNhbHQ",
            "$argon2id$v=19$m=65536,t=3,p=2$c29tZXNhbHQ$abcd$extra",
            "$argon2id$m=65536,t=3,p=2$c29tZXNhbHQ$abcd",
        ] {
            assert!(
                matches!(parse(encoded), Err(DigestError::InvalidHash)),
                "{encoded:?}"
            );
        }
    }

    #[test]
    fn other_versions_are_incompatible() {
        for version in ["16", "0", "20", "-1", "4294967295", "4294967296"] {
            let encoded = SAMPLE.replace("v=19", &format!("v={version}"));
            match parse(&encoded) {
                Err(DigestError::IncompatibleVersion { found, expected }) => {
                    assert_eq!(found.to_string(), version);
                    assert_eq!(expected, 19);
                }
                other => panic!("expected IncompatibleVersion, got: {other:?}"),
            }
        }
    }

    #[test]
    fn malformed_version_propagates_parse_error() {
        let encoded = SAMPLE.replace("v=19", "v=nineteen");
        assert!(matches!(
            parse(&encoded),
            Err(DigestError::InvalidVersionField(FieldError::Int(_)))
        ));

        let encoded = SAMPLE.replace("v=19", "v=99999999999999999999");
        assert!(matches!(
            parse(&encoded),
            Err(DigestError::InvalidVersionField(FieldError::Int(_)))
        ));

        let encoded = SAMPLE.replace("v=19", "19");
        assert!(matches!(
            parse(&encoded),
            Err(DigestError::InvalidVersionField(FieldError::MissingPrefix("v")))
        ));
    }

    #[test]
    fn malformed_cost_field_fails() {
        let encoded = SAMPLE.replace("t=3", "t=three");
        assert!(matches!(
            parse(&encoded),
            Err(DigestError::InvalidIterations(_))
        ));
    }

    #[test]
    fn padded_or_invalid_base64_fails() {
        let encoded = SAMPLE.replace("c29tZXNhbHQ", "c29tZXNhbHQ=");
        assert!(matches!(parse(&encoded), Err(DigestError::InvalidSalt(_))));

        let encoded = SAMPLE.replace("c29tZXNhbHQ", "c29t*XNhbHQ");
        assert!(matches!(parse(&encoded), Err(DigestError::InvalidSalt(_))));

        let encoded = format!("{SAMPLE}!");
        assert!(matches!(parse(&encoded), Err(DigestError::InvalidDigest(_))));
    }

    #[test]
    fn non_canonical_trailing_bits_fail() {
        // "c29tZXNhbHR" differs from "c29tZXNhbHQ" only in unused trailing bits
        let encoded = SAMPLE.replace("c29tZXNhbHQ", "c29tZXNhbHR");
        assert!(matches!(parse(&encoded), Err(DigestError::InvalidSalt(_))));
    }
}
