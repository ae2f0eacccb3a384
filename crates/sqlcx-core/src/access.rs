//! Access-method tags as reported by the engine's EXPLAIN, and the fixed
//! tag → complexity table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::complexity::ComplexityClass;

/// Parsed access-method tag. Matching is case-sensitive and exact;
/// anything unlisted is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum AccessMethod {
    FullScan,
    IndexScan,
    RangeScan,
    Ref,
    EqRef,
    Const,
    Subquery,
    Other(String),
}

impl AccessMethod {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "ALL" => AccessMethod::FullScan,
            "index" => AccessMethod::IndexScan,
            "range" => AccessMethod::RangeScan,
            "ref" => AccessMethod::Ref,
            "eq_ref" => AccessMethod::EqRef,
            "const" => AccessMethod::Const,
            "subquery" => AccessMethod::Subquery,
            other => AccessMethod::Other(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            AccessMethod::FullScan => "ALL",
            AccessMethod::IndexScan => "index",
            AccessMethod::RangeScan => "range",
            AccessMethod::Ref => "ref",
            AccessMethod::EqRef => "eq_ref",
            AccessMethod::Const => "const",
            AccessMethod::Subquery => "subquery",
            AccessMethod::Other(tag) => tag,
        }
    }

    /// Direct classification. Subqueries have no class of their own (they take
    /// the nested plan's dominant class), so they report `Unknown` here.
    pub fn class(&self) -> ComplexityClass {
        match self {
            AccessMethod::FullScan => ComplexityClass::Linear,
            AccessMethod::IndexScan | AccessMethod::RangeScan => ComplexityClass::Logarithmic,
            AccessMethod::Ref | AccessMethod::EqRef | AccessMethod::Const => {
                ComplexityClass::Constant
            }
            AccessMethod::Subquery | AccessMethod::Other(_) => ComplexityClass::Unknown,
        }
    }

    /// Human label for the access strategy; `None` for tags without one.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            AccessMethod::FullScan => Some("Full Table Scan"),
            AccessMethod::IndexScan => Some("Index Scan"),
            AccessMethod::RangeScan => Some("Range Scan"),
            AccessMethod::Ref | AccessMethod::EqRef => Some("Index Lookup"),
            AccessMethod::Const => Some("Constant Lookup"),
            AccessMethod::Subquery | AccessMethod::Other(_) => None,
        }
    }

    pub fn is_subquery(&self) -> bool {
        matches!(self, AccessMethod::Subquery)
    }
}

impl fmt::Display for AccessMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl From<String> for AccessMethod {
    fn from(tag: String) -> Self {
        AccessMethod::parse(&tag)
    }
}

impl From<AccessMethod> for String {
    fn from(method: AccessMethod) -> Self {
        method.tag().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::AccessMethod;
    use crate::complexity::ComplexityClass::*;

    #[test]
    fn table_matches_known_tags() {
        let cases = [
            ("ALL", Linear, Some("Full Table Scan")),
            ("index", Logarithmic, Some("Index Scan")),
            ("range", Logarithmic, Some("Range Scan")),
            ("ref", Constant, Some("Index Lookup")),
            ("eq_ref", Constant, Some("Index Lookup")),
            ("const", Constant, Some("Constant Lookup")),
        ];
        for (tag, class, label) in cases {
            let m = AccessMethod::parse(tag);
            assert_eq!(m.class(), class, "tag {tag}");
            assert_eq!(m.label(), label, "tag {tag}");
            assert_eq!(m.tag(), tag);
        }
    }

    #[test]
    fn tags_are_case_sensitive() {
        assert_eq!(AccessMethod::parse("all"), AccessMethod::Other("all".into()));
        assert_eq!(AccessMethod::parse("Index").class(), Unknown);
        assert_eq!(AccessMethod::parse("weird_tag").label(), None);
    }

    #[test]
    fn subquery_is_recognized() {
        assert!(AccessMethod::parse("subquery").is_subquery());
        assert!(!AccessMethod::parse("SUBQUERY").is_subquery());
    }
}
