//! Enum registry: stable integer codes for parameter kinds and operators.
//!
//! Name matching is ASCII case-insensitive and exact: `"Property"`,
//! `"property"` and `"PROPERTY"` all resolve to code 3, while `" Property"`
//! does not. The same rule applies to every table.

use crate::error::EnumError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A closed enumeration with a fixed name and wire code per member
pub trait Coded: Copy + Eq + 'static {
    /// Table name used in error messages
    const TABLE: &'static str;

    /// Every member, in code order
    const ALL: &'static [Self];

    /// Stable wire code
    fn code(self) -> u8;

    /// Canonical display name
    fn name(self) -> &'static str;
}

/// Kind of structured search filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum ParameterKind {
    /// IFC entity type, e.g. `IfcWall`
    EntityType = 1,
    /// Non-classification property set name
    PropertySet = 2,
    /// Property name/value pair
    Property = 3,
    /// Classification set name, e.g. `Uniclass`
    ClassificationParameterSet = 4,
    /// Name/value pair inside a classification set
    ClassificationParameter = 5,
    /// Building storey
    Storey = 6,
    /// Radius around an anchor element
    Distance = 7,
}

impl Coded for ParameterKind {
    const TABLE: &'static str = "parameter";

    const ALL: &'static [Self] = &[
        Self::EntityType,
        Self::PropertySet,
        Self::Property,
        Self::ClassificationParameterSet,
        Self::ClassificationParameter,
        Self::Storey,
        Self::Distance,
    ];

    fn code(self) -> u8 {
        self as u8
    }

    fn name(self) -> &'static str {
        match self {
            Self::EntityType => "EntityType",
            Self::PropertySet => "PropertySet",
            Self::Property => "Property",
            Self::ClassificationParameterSet => "ClassificationParameterSet",
            Self::ClassificationParameter => "ClassificationParameter",
            Self::Storey => "Storey",
            Self::Distance => "Distance",
        }
    }
}

/// Comparison operator of a filter
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum Operator {
    /// Exact (case-insensitive) equality
    #[default]
    Equal = 1,
    /// Negated equality
    NotEqual = 2,
}

impl Coded for Operator {
    const TABLE: &'static str = "operator";

    const ALL: &'static [Self] = &[Self::Equal, Self::NotEqual];

    fn code(self) -> u8 {
        self as u8
    }

    fn name(self) -> &'static str {
        match self {
            Self::Equal => "Equal",
            Self::NotEqual => "NotEqual",
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParameterKind {
    type Err = EnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnumTable::new().parse(s)
    }
}

impl FromStr for Operator {
    type Err = EnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnumTable::new().parse(s)
    }
}

/// One row of an enum table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumEntry<T> {
    /// Canonical name
    pub name: &'static str,
    /// Wire code
    pub code: u8,
    /// Typed member
    pub value: T,
}

/// Immutable name → code table for one enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumTable<T> {
    entries: Vec<EnumEntry<T>>,
}

impl<T: Coded> EnumTable<T> {
    /// Build the table from the enumeration's members
    #[must_use]
    pub fn new() -> Self {
        let entries = T::ALL
            .iter()
            .map(|&value| EnumEntry {
                name: value.name(),
                code: value.code(),
                value,
            })
            .collect();
        Self { entries }
    }

    /// Look up the entry for a name
    ///
    /// # Errors
    ///
    /// Returns `UnknownEnumValue` if the name is not in the table
    pub fn entry(&self, name: &str) -> Result<&EnumEntry<T>, EnumError> {
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| EnumError::UnknownEnumValue {
                table: T::TABLE,
                name: name.to_string(),
            })
    }

    /// Resolve a name to its wire code
    ///
    /// # Errors
    ///
    /// Returns `UnknownEnumValue` if the name is not in the table
    pub fn resolve(&self, name: &str) -> Result<u8, EnumError> {
        self.entry(name).map(|e| e.code)
    }

    /// Resolve a name to its typed member
    ///
    /// # Errors
    ///
    /// Returns `UnknownEnumValue` if the name is not in the table
    pub fn parse(&self, name: &str) -> Result<T, EnumError> {
        self.entry(name).map(|e| e.value)
    }

    /// Reverse lookup from code to canonical name
    #[must_use]
    pub fn name_of(&self, code: u8) -> Option<&'static str> {
        self.entries.iter().find(|e| e.code == code).map(|e| e.name)
    }

    /// Canonical names in code order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }

    /// Iterate entries in code order
    pub fn iter(&self) -> impl Iterator<Item = &EnumEntry<T>> {
        self.entries.iter()
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Coded> Default for EnumTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Both enum tables used by the search compiler.
///
/// Built once at startup and shared by reference; it is never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumRegistry {
    parameters: EnumTable<ParameterKind>,
    operators: EnumTable<Operator>,
}

impl EnumRegistry {
    /// The standard dTwin tables
    #[must_use]
    pub fn standard() -> Self {
        Self {
            parameters: EnumTable::new(),
            operators: EnumTable::new(),
        }
    }

    /// Parameter kind table
    #[must_use]
    pub fn parameters(&self) -> &EnumTable<ParameterKind> {
        &self.parameters
    }

    /// Operator table
    #[must_use]
    pub fn operators(&self) -> &EnumTable<Operator> {
        &self.operators
    }

    /// Resolve a parameter kind name
    ///
    /// # Errors
    ///
    /// Returns `UnknownEnumValue` for names outside the table
    pub fn parameter(&self, name: &str) -> Result<ParameterKind, EnumError> {
        self.parameters.parse(name)
    }

    /// Resolve an operator name
    ///
    /// # Errors
    ///
    /// Returns `UnknownEnumValue` for names outside the table
    pub fn operator(&self, name: &str) -> Result<Operator, EnumError> {
        self.operators.parse(name)
    }
}

impl Default for EnumRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_parameter_codes() {
        let registry = EnumRegistry::standard();
        let table = registry.parameters();
        assert_eq!(table.resolve("EntityType").unwrap(), 1);
        assert_eq!(table.resolve("PropertySet").unwrap(), 2);
        assert_eq!(table.resolve("Property").unwrap(), 3);
        assert_eq!(table.resolve("ClassificationParameterSet").unwrap(), 4);
        assert_eq!(table.resolve("ClassificationParameter").unwrap(), 5);
        assert_eq!(table.resolve("Storey").unwrap(), 6);
        assert_eq!(table.resolve("Distance").unwrap(), 7);
        assert_eq!(table.len(), 7);
    }

    #[test]
    fn test_parameter_codes_injective() {
        let registry = EnumRegistry::standard();
        let codes: HashSet<u8> = registry.parameters().iter().map(|e| e.code).collect();
        assert_eq!(codes.len(), registry.parameters().len());
    }

    #[test]
    fn test_operator_codes() {
        let registry = EnumRegistry::standard();
        assert_eq!(registry.operators().resolve("Equal").unwrap(), 1);
        assert_eq!(registry.operators().resolve("NotEqual").unwrap(), 2);
        assert_eq!(Operator::default(), Operator::Equal);
    }

    #[test]
    fn test_case_insensitive_match() {
        let registry = EnumRegistry::standard();
        assert_eq!(registry.parameter("property").unwrap(), ParameterKind::Property);
        assert_eq!(registry.parameter("PROPERTY").unwrap(), ParameterKind::Property);
        assert_eq!(registry.parameter("entityType").unwrap(), ParameterKind::EntityType);
        assert_eq!(registry.operator("notequal").unwrap(), Operator::NotEqual);
    }

    #[test]
    fn test_no_trimming() {
        let registry = EnumRegistry::standard();
        assert!(registry.parameter(" Property").is_err());
        assert!(registry.parameter("").is_err());
    }

    #[test]
    fn test_unknown_value_carries_name() {
        let registry = EnumRegistry::standard();
        let err = registry.parameter("Elevation").unwrap_err();
        assert_eq!(
            err,
            EnumError::UnknownEnumValue {
                table: "parameter",
                name: "Elevation".to_string(),
            }
        );
    }

    #[test]
    fn test_name_of() {
        let registry = EnumRegistry::standard();
        assert_eq!(registry.parameters().name_of(6), Some("Storey"));
        assert_eq!(registry.parameters().name_of(0), None);
        assert_eq!(registry.operators().name_of(2), Some("NotEqual"));
    }

    #[test]
    fn test_from_str_matches_table() {
        assert_eq!("distance".parse::<ParameterKind>().unwrap(), ParameterKind::Distance);
        assert_eq!("EQUAL".parse::<Operator>().unwrap(), Operator::Equal);
        assert!("Like".parse::<Operator>().is_err());
        for entry in EnumRegistry::standard().parameters().iter() {
            let upper = entry.name.to_ascii_uppercase();
            assert_eq!(upper.parse::<ParameterKind>().unwrap(), entry.value);
        }
        assert_eq!(
            " Equal".parse::<Operator>(),
            EnumRegistry::standard().operator(" Equal")
        );
    }

    #[test]
    fn test_display_is_canonical_name() {
        assert_eq!(
            ParameterKind::ClassificationParameterSet.to_string(),
            "ClassificationParameterSet"
        );
        assert_eq!(Operator::NotEqual.to_string(), "NotEqual");
    }

    proptest! {
        #[test]
        fn prop_resolve_ignores_ascii_case(idx in 0usize..7, mask in any::<u64>()) {
            let registry = EnumRegistry::standard();
            let kind = ParameterKind::ALL[idx];
            let scrambled: String = kind
                .name()
                .chars()
                .enumerate()
                .map(|(i, c)| {
                    if (mask >> (i % 64)) & 1 == 1 {
                        c.to_ascii_uppercase()
                    } else {
                        c.to_ascii_lowercase()
                    }
                })
                .collect();
            prop_assert_eq!(registry.parameters().resolve(&scrambled).unwrap(), kind.code());
        }
    }
}
