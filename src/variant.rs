//! Variant specifiers and their beacon query wire form.

use crate::Error;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Reference assembly sent with every variant query.
pub const ASSEMBLY_ID: &str = "GRCh37";

/// A genomic variant, parsed from a `CHROM-POS-REF-ALT` specifier.
///
/// Fields are kept as the raw tokens; the position is passed through to the
/// beacon without being interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub reference_name: String,
    pub start: String,
    pub reference_bases: String,
    pub alternate_bases: String,
}

impl Variant {
    /// Query parameters for the `/query` endpoint.
    pub fn to_query(&self) -> VariantQuery<'_> {
        VariantQuery {
            assembly_id: ASSEMBLY_ID,
            reference_name: &self.reference_name,
            start: &self.start,
            reference_bases: &self.reference_bases,
            alternate_bases: &self.alternate_bases,
        }
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split('-').collect();
        let [chrom, pos, r#ref, alt] = fields.as_slice() else {
            return Err(Error::InvalidVariant(format!(
                "expected CHROM-POS-REF-ALT, got {:?}",
                s
            )));
        };

        Ok(Variant {
            reference_name: chrom.to_string(),
            start: pos.to_string(),
            reference_bases: r#ref.to_string(),
            alternate_bases: alt.to_string(),
        })
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.reference_name, self.start, self.reference_bases, self.alternate_bases
        )
    }
}

/// Wire form of a variant query, serialized into the request query string as
/// `assemblyId=...&referenceName=...&start=...&referenceBases=...&alternateBases=...`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantQuery<'a> {
    pub assembly_id: &'static str,
    pub reference_name: &'a str,
    pub start: &'a str,
    pub reference_bases: &'a str,
    pub alternate_bases: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variant() {
        let variant: Variant = "1-123456-A-G".parse().unwrap();
        assert_eq!(variant.reference_name, "1");
        assert_eq!(variant.start, "123456");
        assert_eq!(variant.reference_bases, "A");
        assert_eq!(variant.alternate_bases, "G");
    }

    #[test]
    fn test_parse_too_few_fields() {
        let result: Result<Variant, _> = "1-123456-A".parse();
        assert!(matches!(result, Err(Error::InvalidVariant(_))));
    }

    #[test]
    fn test_parse_too_many_fields() {
        let result: Result<Variant, _> = "1-123456-A-G-T".parse();
        assert!(matches!(result, Err(Error::InvalidVariant(_))));
    }

    #[test]
    fn test_parse_empty() {
        let result: Result<Variant, _> = "".parse();
        assert!(matches!(result, Err(Error::InvalidVariant(_))));
    }

    #[test]
    fn test_display_round_trip() {
        let variant: Variant = "X-1000-AT-C".parse().unwrap();
        assert_eq!(variant.to_string(), "X-1000-AT-C");
    }

    #[test]
    fn test_query_wire_names() {
        let variant: Variant = "1-123456-A-G".parse().unwrap();
        let value = serde_json::to_value(variant.to_query()).unwrap();

        assert_eq!(value["assemblyId"], "GRCh37");
        assert_eq!(value["referenceName"], "1");
        assert_eq!(value["start"], "123456");
        assert_eq!(value["referenceBases"], "A");
        assert_eq!(value["alternateBases"], "G");
    }
}
