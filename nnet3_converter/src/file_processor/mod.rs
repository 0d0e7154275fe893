//! Reading model files from disk

mod processor;

pub use processor::{FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError};

use crate::logging::codes::file_processing;

/// Confirm the file processing codes are registered and report the limits
pub fn init_file_processor_logging() -> Result<(), String> {
    let unregistered: Vec<&str> = [
        file_processing::FILE_NOT_FOUND,
        file_processing::FILE_TOO_LARGE,
        file_processing::EMPTY_FILE,
        file_processing::PERMISSION_DENIED,
        file_processing::INVALID_ENCODING,
        file_processing::IO_ERROR,
        file_processing::INVALID_PATH,
    ]
    .iter()
    .filter(|code| code.metadata().is_none())
    .map(|code| code.as_str())
    .collect();

    if !unregistered.is_empty() {
        return Err(format!(
            "Unregistered file processing codes: {}",
            unregistered.join(", ")
        ));
    }

    crate::log_debug!("File processor limits loaded",
        "max_file_size" => FileProcessor::max_file_size(),
        "max_line_count" => crate::config::compile_time::file_processing::MAX_LINE_COUNT);

    Ok(())
}
