//! Constructors for variants synthesized during graph assembly
//!
//! Names derive deterministically from inputs and parameters so repeated
//! reductions over the same input stay distinguishable.

use super::attributes::AttributeKey;
use super::kind::ComponentKind;
use super::record::Component;
use crate::values::AttributeValue;

impl Component {
    /// Graph input with a known dimension
    pub fn input(id: usize, name: impl Into<String>, dim: i64) -> Self {
        let mut component = Component::new(id, name, Vec::new(), ComponentKind::Input, "Input");
        component.set_dim(dim);
        component
    }

    pub fn output(id: usize, name: impl Into<String>, inputs: Vec<String>) -> Self {
        Component::new(id, name, inputs, ComponentKind::Output, "Output")
    }

    /// Named `append_{id}`
    pub fn append(id: usize, inputs: Vec<String>) -> Self {
        Component::new(
            id,
            format!("append_{}", id),
            inputs,
            ComponentKind::Append,
            "Append",
        )
    }

    /// Named `{input}.offset.{offset}`
    pub fn offset(id: usize, input: &str, offset: i64) -> Self {
        let mut component = Component::new(
            id,
            format!("{}.offset.{}", input, offset),
            vec![input.to_string()],
            ComponentKind::Offset,
            "Offset",
        );
        component.set_attribute(AttributeKey::Offset, AttributeValue::Int(offset));
        component
    }

    /// Named `{input}.ReplaceIndex.{var_name}{time_index}`
    pub fn replace_index(id: usize, input: &str, var_name: &str, time_index: &str) -> Self {
        Component::new(
            id,
            format!("{}.ReplaceIndex.{}{}", input, var_name, time_index),
            vec![input.to_string()],
            ComponentKind::ReplaceIndex,
            "ReplaceIndex",
        )
    }

    /// Named `{input}.scale.{scale}` with the scale written as a float literal
    pub fn scale(id: usize, input: &str, scale: f64) -> Self {
        let mut component = Component::new(
            id,
            format!("{}.scale.{}", input, float_literal(scale)),
            vec![input.to_string()],
            ComponentKind::Scale,
            "Scale",
        );
        component.set_attribute(AttributeKey::Scale, AttributeValue::Float(scale));
        component
    }

    /// Named `splice_{id}`; keeps the context offsets
    pub fn splice(id: usize, inputs: Vec<String>, context: Vec<i64>) -> Self {
        let mut component = Component::new(
            id,
            format!("splice_{}", id),
            inputs,
            ComponentKind::Splice,
            "Splice",
        );
        component.set_attribute(AttributeKey::Context, AttributeValue::IntVector(context));
        component
    }

    /// Named by joining the inputs with `.sum.`
    pub fn sum(id: usize, inputs: Vec<String>) -> Self {
        let name = inputs.join(".sum.");
        Component::new(id, name, inputs, ComponentKind::Sum, "Sum")
    }
}

/// Render a float the way a decimal literal is written: `2.0`, `0.5`
fn float_literal(value: f64) -> String {
    // Debug formatting always keeps a fractional part for finite values
    format!("{:?}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_has_dim_and_no_inputs() {
        let input = Component::input(0, "input", 40);
        assert_eq!(input.name(), "input");
        assert_eq!(input.dim(), Some(40));
        assert!(input.inputs().is_empty());
        assert_eq!(input.kind(), ComponentKind::Input);
    }

    #[test]
    fn test_structural_names() {
        assert_eq!(Component::append(7, vec!["a".into(), "b".into()]).name(), "append_7");
        assert_eq!(Component::offset(1, "x", -2).name(), "x.offset.-2");
        assert_eq!(
            Component::replace_index(2, "ivector", "t", "0").name(),
            "ivector.ReplaceIndex.t0"
        );
        assert_eq!(Component::splice(4, vec!["x".into()], vec![-1, 0, 1]).name(), "splice_4");
        assert_eq!(Component::output(5, "output", vec!["y".into()]).name(), "output");
    }

    #[test]
    fn test_scale_name_keeps_fraction() {
        assert_eq!(Component::scale(3, "x", 2.0).name(), "x.scale.2.0");
        assert_eq!(Component::scale(3, "x", 0.5).name(), "x.scale.0.5");
        assert_eq!(
            Component::scale(3, "x", 0.5).attribute(AttributeKey::Scale),
            Some(&AttributeValue::Float(0.5))
        );
    }

    #[test]
    fn test_sum_joins_inputs() {
        let sum = Component::sum(9, vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(sum.name(), "a.sum.b.sum.c");
        assert_eq!(sum.type_tag(), "Sum");
        assert_eq!(sum.inputs().len(), 3);
    }

    #[test]
    fn test_repeated_reductions_stay_distinct() {
        let once = Component::offset(1, "x", 1);
        let twice = Component::offset(2, once.name(), 1);
        assert_ne!(once.name(), twice.name());
        assert_eq!(twice.name(), "x.offset.1.offset.1");
        assert_eq!(twice.inputs(), &["x.offset.1".to_string()]);
    }
}
