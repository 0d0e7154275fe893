// Internal modules
pub mod component;
pub mod config;
pub mod declarations;
pub mod file_processor;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod utils;
pub mod values;

// Re-export key types for library consumers
pub use component::{AttributeKey, Component, ComponentKind};
pub use lexical::ParseError;
pub use pipeline::{PipelineError, PipelineResult};
pub use values::{AttributeValue, Tensor};

// Re-export pipeline output for serialization consumers
pub use pipeline::output::PipelineOutput;
