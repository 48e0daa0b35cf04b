//! Parser for the cost segment of a PHC string.
//!
//! ```text
//! m=<memory>,t=<iterations>,p=<threads>
//! ```

use std::str::FromStr;

use crate::error::{DigestError, FieldError};

/// Cost parameters exactly as they appear in an encoded digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostField {
    pub memory: u32,
    pub iterations: u32,
    pub threads: u8,
}

impl CostField {
    /// Parses `m=..,t=..,p=..`; the field order is fixed.
    pub fn parse(segment: &str) -> Result<Self, DigestError> {
        let mut fields = segment.split(',');
        let (Some(m), Some(t), Some(p), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(DigestError::InvalidParamsField);
        };

        Ok(Self {
            memory: parse_field("m", m).map_err(DigestError::InvalidMemory)?,
            iterations: parse_field("t", t).map_err(DigestError::InvalidIterations)?,
            threads: parse_field("p", p).map_err(DigestError::InvalidThreads)?,
        })
    }

    pub fn encode(&self) -> String {
        format!("m={},t={},p={}", self.memory, self.iterations, self.threads)
    }
}

/// Parses a single `<name>=<int>` field.
pub fn parse_field<T>(name: &'static str, field: &str) -> Result<T, FieldError>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    let value = field
        .strip_prefix(name)
        .and_then(|rest| rest.strip_prefix('='))
        .ok_or(FieldError::MissingPrefix(name))?;
    Ok(value.parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fields_in_order() {
        let cost = CostField::parse("m=32768,t=3,p=4").unwrap();
        assert_eq!(cost.memory, 32768);
        assert_eq!(cost.iterations, 3);
        assert_eq!(cost.threads, 4);
        assert_eq!(cost.encode(), "m=32768,t=3,p=4");
    }

    #[test]
    fn reordered_fields_fail() {
        assert!(matches!(
            CostField::parse("t=3,m=32768,p=4"),
            Err(DigestError::InvalidMemory(FieldError::MissingPrefix("m")))
        ));
    }

    #[test]
    fn wrong_field_count_fails() {
        assert!(matches!(
            CostField::parse("m=32768,t=3"),
            Err(DigestError::InvalidParamsField)
        ));
        assert!(matches!(
            CostField::parse("m=32768,t=3,p=4,x=1"),
            Err(DigestError::InvalidParamsField)
        ));
    }

    #[test]
    fn non_numeric_values_fail_per_field() {
        assert!(matches!(
            CostField::parse("m=lots,t=3,p=4"),
            Err(DigestError::InvalidMemory(FieldError::Int(_)))
        ));
        assert!(matches!(
            CostField::parse("m=1024,t=,p=4"),
            Err(DigestError::InvalidIterations(FieldError::Int(_)))
        ));
        assert!(matches!(
            CostField::parse("m=1024,t=3,p=-1"),
            Err(DigestError::InvalidThreads(FieldError::Int(_)))
        ));
    }

    #[test]
    fn parallelism_above_u8_fails() {
        assert!(matches!(
            CostField::parse("m=1024,t=3,p=256"),
            Err(DigestError::InvalidThreads(FieldError::Int(_)))
        ));
    }

    #[test]
    fn parse_field_requires_exact_name() {
        assert_eq!(parse_field::<u32>("v", "v=19").unwrap(), 19);
        assert!(matches!(
            parse_field::<u32>("v", "vv=19"),
            Err(FieldError::MissingPrefix("v"))
        ));
        assert!(matches!(
            parse_field::<u32>("v", "19"),
            Err(FieldError::MissingPrefix("v"))
        ));
    }
}
