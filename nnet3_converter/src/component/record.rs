//! The component record: one IR node per declaration
//!
//! A record is created with its identity fixed, filled by the attribute read
//! loop, normalized, and finally has its weight attributes promoted to named
//! constants. After `read_attributes` returns it is not mutated again.

use super::attributes::{find_rule, AttributeKey, PROMOTED_KEYS};
use super::kind::ComponentKind;
use crate::config::runtime::ParserPreferences;
use crate::lexical::tokenizer::tag_name;
use crate::lexical::{LineCursor, LineSource, ParseError};
use crate::utils::Position;
use crate::values::{AttributeValue, Tensor};
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    id: usize,
    name: String,
    kind: ComponentKind,
    type_tag: String,
    inputs: Vec<String>,
    dim: Option<i64>,
    attributes: IndexMap<AttributeKey, AttributeValue>,
    constants: IndexMap<String, Tensor>,
}

impl Component {
    pub fn new(
        id: usize,
        name: impl Into<String>,
        inputs: Vec<String>,
        kind: ComponentKind,
        type_tag: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            type_tag: type_tag.into(),
            inputs,
            dim: None,
            attributes: IndexMap::new(),
            constants: IndexMap::new(),
        }
    }

    /// Create an empty record for a declaration tag such as `<AffineComponent>`
    pub fn declared(
        id: usize,
        name: impl Into<String>,
        type_tag: &str,
        at: Position,
    ) -> Result<Self, ParseError> {
        Self::declared_with_inputs(id, name, Vec::new(), type_tag, at)
    }

    /// Like `declared`, but starting from known topology inputs.
    ///
    /// Promoted constants are appended after these.
    pub fn declared_with_inputs(
        id: usize,
        name: impl Into<String>,
        inputs: Vec<String>,
        type_tag: &str,
        at: Position,
    ) -> Result<Self, ParseError> {
        let type_name = tag_name(type_tag);
        let kind = ComponentKind::from_type_name(type_name).ok_or_else(|| {
            ParseError::UnsupportedComponentType {
                type_tag: type_tag.to_string(),
                at,
            }
        })?;

        Ok(Self::new(id, name, inputs, kind, type_name))
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Grammar type name, or the variant name for synthesized components
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn dim(&self) -> Option<i64> {
        self.dim
    }

    pub fn attributes(&self) -> &IndexMap<AttributeKey, AttributeValue> {
        &self.attributes
    }

    pub fn attribute(&self, key: AttributeKey) -> Option<&AttributeValue> {
        self.attributes.get(&key)
    }

    pub fn constants(&self) -> &IndexMap<String, Tensor> {
        &self.constants
    }

    pub fn constant(&self, name: &str) -> Option<&Tensor> {
        self.constants.get(name)
    }

    pub(crate) fn set_dim(&mut self, dim: i64) {
        self.dim = Some(dim);
    }

    pub(crate) fn set_attribute(&mut self, key: AttributeKey, value: AttributeValue) {
        self.attributes.insert(key, value);
    }

    // ========================================================================
    // READ LOOP
    // ========================================================================

    /// Read attributes until one of `terminating_tokens` is seen.
    ///
    /// Tags outside this variant's table are skipped without consuming any
    /// value. Returns the terminating token that ended the loop.
    pub fn read_attributes<S: LineSource>(
        &mut self,
        cursor: &mut LineCursor<S>,
        terminating_tokens: &[&str],
        preferences: &ParserPreferences,
    ) -> Result<String, ParseError> {
        let table = self.kind.attribute_table();

        let terminator = loop {
            let rule = match cursor.next_token() {
                Some(token) if terminating_tokens.contains(&token) => break token.to_owned(),
                Some(token) => match find_rule(table, token) {
                    Some(rule) => rule,
                    None => {
                        if preferences.log_skipped_tags && token.starts_with('<') {
                            let token = token.to_owned();
                            crate::log_debug!("Skipping unrecognized tag",
                                "component" => &self.name,
                                "tag" => token,
                                "position" => cursor.position()
                            );
                        }
                        continue;
                    }
                },
                None => {
                    if !cursor.advance_line() {
                        return Err(ParseError::UnexpectedEndOfInput {
                            at: cursor.position(),
                        });
                    }
                    continue;
                }
            };

            let value = rule.reader.read(cursor)?;
            self.attributes.insert(rule.key, value);
        };

        self.adjust_attributes()?;
        self.lift_dim();
        self.promote_constants();

        Ok(terminator)
    }

    // ========================================================================
    // FINALIZATION
    // ========================================================================

    /// Variant-specific normalization; only batch norm has one
    fn adjust_attributes(&mut self) -> Result<(), ParseError> {
        match self.kind {
            ComponentKind::BatchNorm => self.fold_batch_norm_statistics(),
            _ => Ok(()),
        }
    }

    /// Turn mean/variance statistics into an equivalent scale and shift.
    ///
    /// `stats_mean` becomes the scale `target_rms * (var + epsilon)^-0.5`,
    /// `stats_var` becomes the shift `-(scale * mean)`.
    fn fold_batch_norm_statistics(&mut self) -> Result<(), ParseError> {
        let epsilon = self.required_float(AttributeKey::Epsilon)? as f32;
        let target_rms = self.required_float(AttributeKey::TargetRms)? as f32;
        let mean = self.required_vector(AttributeKey::StatsMean)?;
        let var = self.required_vector(AttributeKey::StatsVar)?;

        if mean.len() != var.len() {
            return Err(ParseError::InconsistentAttributes {
                component: self.name.clone(),
                message: format!(
                    "stats_mean has {} elements but stats_var has {}",
                    mean.len(),
                    var.len()
                ),
            });
        }

        let scale: Vec<f32> = var
            .iter()
            .map(|v| target_rms * (v + epsilon).powf(-0.5))
            .collect();
        let shift: Vec<f32> = scale.iter().zip(mean).map(|(s, m)| -(s * m)).collect();

        self.attributes
            .insert(AttributeKey::StatsVar, AttributeValue::FloatVector(shift));
        self.attributes
            .insert(AttributeKey::StatsMean, AttributeValue::FloatVector(scale));
        Ok(())
    }

    fn required_float(&self, key: AttributeKey) -> Result<f64, ParseError> {
        self.attribute(key)
            .and_then(AttributeValue::as_float)
            .ok_or_else(|| self.missing_attribute(key))
    }

    fn required_vector(&self, key: AttributeKey) -> Result<Vec<f32>, ParseError> {
        self.attribute(key)
            .and_then(AttributeValue::as_float_vector)
            .map(<[f32]>::to_vec)
            .ok_or_else(|| self.missing_attribute(key))
    }

    fn missing_attribute(&self, key: AttributeKey) -> ParseError {
        ParseError::InconsistentAttributes {
            component: self.name.clone(),
            message: format!("missing attribute {}", key),
        }
    }

    /// Move `dim` out of the attribute map into its own field
    fn lift_dim(&mut self) {
        if let Some(value) = self.attributes.shift_remove(&AttributeKey::Dim) {
            self.dim = value.as_int();
        }
    }

    /// Move weight attributes into constants named `{name}_{key}` and wire
    /// them as inputs. An empty bias is dropped.
    fn promote_constants(&mut self) {
        for key in PROMOTED_KEYS {
            let value = match self.attributes.shift_remove(&key) {
                Some(value) => value,
                None => continue,
            };

            if key == AttributeKey::Bias && value.is_empty() {
                continue;
            }

            match Tensor::try_from(value) {
                Ok(tensor) => {
                    let constant_name = format!("{}_{}", self.name, key);
                    self.inputs.push(constant_name.clone());
                    self.constants.insert(constant_name, tensor);
                }
                Err(value) => {
                    self.attributes.insert(key, value);
                }
            }
        }
    }
}
