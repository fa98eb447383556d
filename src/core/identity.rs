//! Record identity system using human-readable sequential ids
//!
//! Every record carries a display id of the form `{PREFIX}-{YEAR}-{NNN}`,
//! e.g. `CO-2025-001`. New ids are assigned by scanning the existing
//! collection for the highest numeric suffix and incrementing. There is no
//! guarantee against duplicate generation under concurrent writers; gcPanel
//! is a single-process tool.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Record type prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Prime or owner contract
    Contract,
    /// Change order against a contract
    ChangeOrder,
    /// Subcontract agreement
    Subcontract,
    /// Payment application / invoice
    Invoice,
    /// Per-user preference record
    Preference,
    /// System-wide configuration record
    Configuration,
    /// Third-party integration record
    Integration,
}

impl RecordKind {
    /// Get the id prefix for this record kind
    pub fn prefix(&self) -> &'static str {
        match self {
            RecordKind::Contract => "CON",
            RecordKind::ChangeOrder => "CO",
            RecordKind::Subcontract => "SC",
            RecordKind::Invoice => "INV",
            RecordKind::Preference => "PREF",
            RecordKind::Configuration => "CFG",
            RecordKind::Integration => "INT",
        }
    }

    /// Get all record kinds
    pub fn all() -> &'static [RecordKind] {
        &[
            RecordKind::Contract,
            RecordKind::ChangeOrder,
            RecordKind::Subcontract,
            RecordKind::Invoice,
            RecordKind::Preference,
            RecordKind::Configuration,
            RecordKind::Integration,
        ]
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

impl FromStr for RecordKind {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CON" => Ok(RecordKind::Contract),
            "CO" => Ok(RecordKind::ChangeOrder),
            "SC" => Ok(RecordKind::Subcontract),
            "INV" => Ok(RecordKind::Invoice),
            "PREF" => Ok(RecordKind::Preference),
            "CFG" => Ok(RecordKind::Configuration),
            "INT" => Ok(RecordKind::Integration),
            _ => Err(IdParseError::InvalidPrefix(s.to_string())),
        }
    }
}

/// A record identifier combining a kind prefix, year, and sequence number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId {
    kind: RecordKind,
    year: i32,
    sequence: u32,
}

impl RecordId {
    /// Create a RecordId from its parts
    pub fn from_parts(kind: RecordKind, year: i32, sequence: u32) -> Self {
        Self {
            kind,
            year,
            sequence,
        }
    }

    /// Get the record kind
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Get the year component
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Get the sequence component
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Parse a RecordId from a string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{:03}", self.kind, self.year, self.sequence)
    }
}

impl FromStr for RecordId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix_str, rest) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingDelimiter(s.to_string()))?;
        let (year_str, seq_str) = rest
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingDelimiter(s.to_string()))?;

        let kind = prefix_str.parse()?;
        let year = year_str
            .parse()
            .map_err(|_| IdParseError::InvalidYear(year_str.to_string()))?;
        let sequence = seq_str
            .parse()
            .map_err(|_| IdParseError::InvalidSequence(seq_str.to_string()))?;

        Ok(Self {
            kind,
            year,
            sequence,
        })
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Deserialize an optional record id, degrading unparsable values to `None`.
///
/// Data files are hand-editable JSON; a record whose id no longer parses
/// must lose only its id, not make the whole collection unreadable. The
/// max-suffix scan already skips id-less records.
pub fn deserialize_lenient_id<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse().ok()))
}

/// Errors that can occur when parsing record ids
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("invalid record prefix: '{0}' (valid: CON, CO, SC, INV, PREF, CFG, INT)")]
    InvalidPrefix(String),

    #[error("missing '-' delimiter in record id: '{0}'")]
    MissingDelimiter(String),

    #[error("invalid year in record id: '{0}'")]
    InvalidYear(String),

    #[error("invalid sequence number in record id: '{0}'")]
    InvalidSequence(String),
}

/// Produce the next sequential id for a collection of existing ids.
///
/// Filters `existing_ids` to those starting with `{PREFIX}-{year}-`, parses
/// the trailing numeric suffix of each, and returns the maximum plus one
/// (starting at 001 when the collection is empty). Malformed suffixes are
/// skipped rather than treated as errors.
pub fn next_id<I, S>(existing_ids: I, kind: RecordKind, year: i32) -> RecordId
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let needle = format!("{}-{}-", kind.prefix(), year);
    let max = existing_ids
        .into_iter()
        .filter_map(|id| {
            let id = id.as_ref();
            id.strip_prefix(&needle)
                .and_then(|suffix| suffix.parse::<u32>().ok())
        })
        .max()
        .unwrap_or(0);

    RecordId::from_parts(kind, year, max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_display() {
        let id = RecordId::from_parts(RecordKind::ChangeOrder, 2025, 1);
        assert_eq!(id.to_string(), "CO-2025-001");
    }

    #[test]
    fn test_record_id_roundtrip() {
        let id = RecordId::from_parts(RecordKind::Subcontract, 2025, 38);
        let parsed = RecordId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_record_id_invalid_prefix() {
        let err = RecordId::parse("XXX-2025-001").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidPrefix(_)));
    }

    #[test]
    fn test_record_id_missing_delimiter() {
        let err = RecordId::parse("CO2025001").unwrap_err();
        assert!(matches!(err, IdParseError::MissingDelimiter(_)));
    }

    #[test]
    fn test_record_id_invalid_sequence() {
        let err = RecordId::parse("CO-2025-abc").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidSequence(_)));
    }

    #[test]
    fn test_next_id_empty_collection() {
        let ids: Vec<String> = vec![];
        let id = next_id(&ids, RecordKind::ChangeOrder, 2025);
        assert_eq!(id.to_string(), "CO-2025-001");
    }

    #[test]
    fn test_next_id_increments_past_max() {
        let ids = ["CO-2025-001", "CO-2025-003"];
        let id = next_id(ids, RecordKind::ChangeOrder, 2025);
        assert_eq!(id.to_string(), "CO-2025-004");
    }

    #[test]
    fn test_next_id_skips_malformed_suffix() {
        let ids = ["CO-2025-001", "CO-2025-abc", "CO-2025-002"];
        let id = next_id(ids, RecordKind::ChangeOrder, 2025);
        assert_eq!(id.to_string(), "CO-2025-003");
    }

    #[test]
    fn test_next_id_ignores_other_kinds_and_years() {
        let ids = ["SC-2025-009", "CO-2024-007", "CO-2025-002"];
        let id = next_id(ids, RecordKind::ChangeOrder, 2025);
        assert_eq!(id.to_string(), "CO-2025-003");
    }

    #[test]
    fn test_all_prefixes_parse() {
        for kind in RecordKind::all() {
            let id = RecordId::from_parts(*kind, 2025, 1);
            let parsed = RecordId::parse(&id.to_string()).unwrap();
            assert_eq!(parsed.kind(), *kind);
        }
    }

    #[test]
    fn test_record_id_serde_as_string() {
        let id = RecordId::from_parts(RecordKind::Invoice, 2025, 87);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"INV-2025-087\"");
        let back: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
