use super::PipelineResult;
use crate::component::Component;
use serde::Serialize;

/// Serializable view of a pipeline result
#[derive(Debug, Serialize)]
pub struct PipelineOutput<'a> {
    pub source: Option<String>,
    pub component_count: usize,
    pub constant_count: usize,
    pub components: &'a [Component],
}

impl<'a> PipelineOutput<'a> {
    pub fn new(result: &'a PipelineResult) -> Self {
        Self {
            source: result
                .file_metadata
                .as_ref()
                .map(|metadata| metadata.path.display().to_string()),
            component_count: result.component_count(),
            constant_count: result.constant_count(),
            components: &result.components,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
