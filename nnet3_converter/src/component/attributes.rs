//! Attribute keys and the per-variant attribute tables

use crate::values::ValueReader;
use serde::Serialize;
use std::fmt;

/// Storage key of a component attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKey {
    Dim,
    InputDim,
    OutputDim,
    Params,
    Bias,
    Epsilon,
    TargetRms,
    StatsMean,
    StatsVar,
    TimeOffsets,
    // Parameters of synthesized variants
    Offset,
    Scale,
    Context,
}

impl AttributeKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKey::Dim => "dim",
            AttributeKey::InputDim => "input_dim",
            AttributeKey::OutputDim => "output_dim",
            AttributeKey::Params => "params",
            AttributeKey::Bias => "bias",
            AttributeKey::Epsilon => "epsilon",
            AttributeKey::TargetRms => "target_rms",
            AttributeKey::StatsMean => "stats_mean",
            AttributeKey::StatsVar => "stats_var",
            AttributeKey::TimeOffsets => "time_offsets",
            AttributeKey::Offset => "offset",
            AttributeKey::Scale => "scale",
            AttributeKey::Context => "context",
        }
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keys moved into constants after reading, in promotion order
pub const PROMOTED_KEYS: [AttributeKey; 4] = [
    AttributeKey::Params,
    AttributeKey::Bias,
    AttributeKey::StatsMean,
    AttributeKey::StatsVar,
];

// ============================================================================
// TABLES
// ============================================================================

/// One table entry: grammar tag, reader and storage key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeRule {
    pub tag: &'static str,
    pub reader: ValueReader,
    pub key: AttributeKey,
}

const fn rule(tag: &'static str, reader: ValueReader, key: AttributeKey) -> AttributeRule {
    AttributeRule { tag, reader, key }
}

pub type AttributeTable = &'static [AttributeRule];

pub const BASE_TABLE: AttributeTable = &[
    rule("<Dim>", ValueReader::Int, AttributeKey::Dim),
    rule("<InputDim>", ValueReader::Int, AttributeKey::InputDim),
    rule("<OutputDim>", ValueReader::Int, AttributeKey::OutputDim),
];

pub const AFFINE_TABLE: AttributeTable = &[
    rule("<Params>", ValueReader::MatrixTransposed, AttributeKey::Params),
    rule("<LinearParams>", ValueReader::MatrixTransposed, AttributeKey::Params),
    rule("<BiasParams>", ValueReader::FloatVector, AttributeKey::Bias),
];

pub const BATCH_NORM_TABLE: AttributeTable = &[
    rule("<Dim>", ValueReader::Int, AttributeKey::Dim),
    rule("<Epsilon>", ValueReader::Float, AttributeKey::Epsilon),
    rule("<TargetRms>", ValueReader::Float, AttributeKey::TargetRms),
    rule("<StatsMean>", ValueReader::FloatVector, AttributeKey::StatsMean),
    rule("<StatsVar>", ValueReader::FloatVector, AttributeKey::StatsVar),
];

pub const TDNN_TABLE: AttributeTable = &[
    rule("<TimeOffsets>", ValueReader::IntVector, AttributeKey::TimeOffsets),
    rule("<LinearParams>", ValueReader::MatrixTransposed, AttributeKey::Params),
    rule("<BiasParams>", ValueReader::FloatVector, AttributeKey::Bias),
];

/// Synthesized variants are never read from tags
pub const EMPTY_TABLE: AttributeTable = &[];

/// Find the rule for a grammar tag
pub fn find_rule(table: AttributeTable, tag: &str) -> Option<&'static AttributeRule> {
    table.iter().find(|rule| rule.tag == tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_override_rather_than_merge() {
        assert!(find_rule(AFFINE_TABLE, "<Dim>").is_none());
        assert!(find_rule(TDNN_TABLE, "<Params>").is_none());
        assert_eq!(
            find_rule(BATCH_NORM_TABLE, "<Dim>").map(|r| r.key),
            Some(AttributeKey::Dim)
        );
    }

    #[test]
    fn test_params_aliases_share_a_key() {
        let params = find_rule(AFFINE_TABLE, "<Params>").unwrap();
        let linear = find_rule(AFFINE_TABLE, "<LinearParams>").unwrap();
        assert_eq!(params.key, linear.key);
        assert_eq!(params.reader, ValueReader::MatrixTransposed);
    }

    #[test]
    fn test_key_strings_match_serialization() {
        for key in [AttributeKey::TargetRms, AttributeKey::TimeOffsets, AttributeKey::Dim] {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }
}
