use crate::file_processor::FileProcessorError;
use crate::lexical::ParseError;
use crate::logging::{codes, Code};

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Parsing failed: {0}")]
    Parse(#[from] ParseError),

    /// The input stream broke before the parser saw the end of the model
    #[error("Input stream failed after {lines_read} lines: {message}")]
    StreamRead { lines_read: usize, message: String },
}

impl PipelineError {
    /// Diagnostic code of the underlying stage error
    pub fn error_code(&self) -> Code {
        match self {
            PipelineError::FileProcessing(error) => error.error_code(),
            PipelineError::Parse(error) => error.error_code(),
            PipelineError::StreamRead { .. } => codes::file_processing::IO_ERROR,
        }
    }
}
