//! Component variants and the type registry
//!
//! A closed set of variants. Each variant carries its attribute table as
//! data; the registry maps grammar type names onto the parsed variants.

use super::attributes::{
    AttributeTable, AFFINE_TABLE, BASE_TABLE, BATCH_NORM_TABLE, EMPTY_TABLE, TDNN_TABLE,
};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComponentKind {
    /// Components carrying only dimension attributes
    Generic,
    Affine,
    BatchNorm,
    Tdnn,
    // Synthesized by graph assembly
    Input,
    Output,
    Append,
    Offset,
    ReplaceIndex,
    Scale,
    Splice,
    Sum,
}

/// Registered grammar type names, in lookup order
const REGISTRY: &[(&str, ComponentKind)] = &[
    ("GeneralDropoutComponent", ComponentKind::Generic),
    ("NoOpComponent", ComponentKind::Generic),
    ("RectifiedLinearComponent", ComponentKind::Generic),
    ("LogSoftmaxComponent", ComponentKind::Generic),
    ("AffineComponent", ComponentKind::Affine),
    ("FixedAffineComponent", ComponentKind::Affine),
    ("LinearComponent", ComponentKind::Affine),
    ("NaturalGradientAffineComponent", ComponentKind::Affine),
    ("BatchNormComponent", ComponentKind::BatchNorm),
    ("TdnnComponent", ComponentKind::Tdnn),
];

impl ComponentKind {
    /// Look up the variant for a bare type name such as `AffineComponent`
    pub fn from_type_name(type_name: &str) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|(name, _)| *name == type_name)
            .map(|(_, kind)| *kind)
    }

    /// All registered type names
    pub fn registered_type_names() -> impl Iterator<Item = &'static str> {
        REGISTRY.iter().map(|(name, _)| *name)
    }

    /// Attribute table used by the read loop
    pub fn attribute_table(&self) -> AttributeTable {
        match self {
            ComponentKind::Generic => BASE_TABLE,
            ComponentKind::Affine => AFFINE_TABLE,
            ComponentKind::BatchNorm => BATCH_NORM_TABLE,
            ComponentKind::Tdnn => TDNN_TABLE,
            ComponentKind::Input
            | ComponentKind::Output
            | ComponentKind::Append
            | ComponentKind::Offset
            | ComponentKind::ReplaceIndex
            | ComponentKind::Scale
            | ComponentKind::Splice
            | ComponentKind::Sum => EMPTY_TABLE,
        }
    }

    /// True for variants built by graph assembly rather than parsed
    pub fn is_synthesized(&self) -> bool {
        !matches!(
            self,
            ComponentKind::Generic
                | ComponentKind::Affine
                | ComponentKind::BatchNorm
                | ComponentKind::Tdnn
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Generic => "Generic",
            ComponentKind::Affine => "Affine",
            ComponentKind::BatchNorm => "BatchNorm",
            ComponentKind::Tdnn => "Tdnn",
            ComponentKind::Input => "Input",
            ComponentKind::Output => "Output",
            ComponentKind::Append => "Append",
            ComponentKind::Offset => "Offset",
            ComponentKind::ReplaceIndex => "ReplaceIndex",
            ComponentKind::Scale => "Scale",
            ComponentKind::Splice => "Splice",
            ComponentKind::Sum => "Sum",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        assert_eq!(
            ComponentKind::from_type_name("NaturalGradientAffineComponent"),
            Some(ComponentKind::Affine)
        );
        assert_eq!(
            ComponentKind::from_type_name("RectifiedLinearComponent"),
            Some(ComponentKind::Generic)
        );
        assert_eq!(
            ComponentKind::from_type_name("BatchNormComponent"),
            Some(ComponentKind::BatchNorm)
        );
        assert_eq!(ComponentKind::from_type_name("LstmNonlinearityComponent"), None);
    }

    #[test]
    fn test_registered_names_are_parsed_variants() {
        assert_eq!(ComponentKind::registered_type_names().count(), 10);
        for name in ComponentKind::registered_type_names() {
            let kind = ComponentKind::from_type_name(name).unwrap();
            assert!(!kind.is_synthesized());
            assert!(!kind.attribute_table().is_empty());
        }
    }

    #[test]
    fn test_synthesized_variants_have_no_table() {
        for kind in [ComponentKind::Append, ComponentKind::Sum, ComponentKind::Splice] {
            assert!(kind.is_synthesized());
            assert!(kind.attribute_table().is_empty());
        }
        assert!(ComponentKind::Output.is_synthesized());
    }
}
