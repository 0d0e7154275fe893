use crate::component::Component;
use crate::file_processor::FileMetadata;
use std::time::Duration;

/// Parsed components with processing metadata
#[derive(Debug)]
pub struct PipelineResult {
    pub components: Vec<Component>,
    /// Present when the input came from a file
    pub file_metadata: Option<FileMetadata>,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn new(
        components: Vec<Component>,
        file_metadata: Option<FileMetadata>,
        processing_duration: Duration,
    ) -> Self {
        Self {
            components,
            file_metadata,
            processing_duration,
        }
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Total number of promoted constants across all components
    pub fn constant_count(&self) -> usize {
        self.components.iter().map(|c| c.constants().len()).sum()
    }

    pub fn find_component(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name() == name)
    }

    pub fn log_success(&self, source_name: &str) {
        crate::log_success!(
            crate::logging::codes::success::PIPELINE_COMPLETE,
            "Model conversion pipeline succeeded",
            "source" => source_name,
            "components" => self.component_count(),
            "constants" => self.constant_count(),
            "duration_ms" => format!("{:.2}", self.processing_duration.as_secs_f64() * 1000.0)
        );
    }
}
