//! Model file reading within the compile-time size and line limits

use crate::config::compile_time::file_processing::{MAX_FILE_SIZE, MAX_LINE_COUNT};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes::{self, Category};
use crate::logging::Code;
use crate::{log_debug, log_error, log_success};
use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("File is empty: {path}")]
    EmptyFile { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("File is not valid UTF-8 text: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading {path}: {message}")]
    IoError { path: String, message: String },

    #[error("Not a model file path: '{path}'")]
    InvalidPath { path: String },

    #[error("File has {lines} lines (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl FileProcessorError {
    pub fn error_code(&self) -> Code {
        use codes::file_processing::*;

        match self {
            FileProcessorError::FileNotFound { .. } => FILE_NOT_FOUND,
            FileProcessorError::FileTooLarge { .. } | FileProcessorError::TooManyLines { .. } => {
                FILE_TOO_LARGE
            }
            FileProcessorError::EmptyFile { .. } => EMPTY_FILE,
            FileProcessorError::PermissionDenied { .. } => PERMISSION_DENIED,
            FileProcessorError::InvalidEncoding { .. } => INVALID_ENCODING,
            FileProcessorError::IoError { .. } => IO_ERROR,
            FileProcessorError::InvalidPath { .. } => INVALID_PATH,
        }
    }

    pub fn category(&self) -> Category {
        self.error_code().category()
    }

    pub fn requires_halt(&self) -> bool {
        self.error_code().requires_halt()
    }

    /// Classify an I/O failure on `path`
    fn from_io(path: &Path, error: &io::Error) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            io::ErrorKind::NotFound => FileProcessorError::FileNotFound { path },
            io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied { path },
            io::ErrorKind::InvalidData => FileProcessorError::InvalidEncoding { path },
            _ => FileProcessorError::IoError {
                path,
                message: error.to_string(),
            },
        }
    }
}

/// Facts about a model file gathered while reading it
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical path
    pub path: PathBuf,
    pub size: u64,
    pub line_count: usize,
    pub modified: Option<DateTime<Utc>>,
}

impl FileMetadata {
    pub fn human_readable_size(&self) -> String {
        human_readable_bytes(self.size)
    }
}

fn human_readable_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit + 1 < UNITS.len() {
        size /= 1024.0;
        unit += 1;
    }

    match unit {
        0 => format!("{} B", bytes),
        _ => format!("{:.2} {}", size, UNITS[unit]),
    }
}

/// Model text plus what was learned reading it
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn throughput_mb_per_sec(&self) -> f64 {
        let seconds = self.processing_duration.as_secs_f64();
        if seconds > 0.0 {
            self.metadata.size as f64 / (1024.0 * 1024.0) / seconds
        } else {
            0.0
        }
    }
}

/// Reads model files within the compile-time limits
#[derive(Debug, Clone)]
pub struct FileProcessor {
    /// Log size and throughput with each successful read
    pub enable_performance_logging: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            enable_performance_logging: true,
        }
    }

    pub fn from_preferences(preferences: &FileProcessorPreferences) -> Self {
        Self {
            enable_performance_logging: preferences.enable_performance_logging,
        }
    }

    pub fn with_performance_logging(mut self, enabled: bool) -> Self {
        self.enable_performance_logging = enabled;
        self
    }

    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    /// Read a model file, logging the outcome either way
    pub fn process_file(&self, file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = Instant::now();
        log_debug!("Reading model file", "file" => file_path);

        match read_model(file_path, start_time) {
            Ok(result) => {
                self.log_success(&result);
                Ok(result)
            }
            Err(error) => {
                log_error!(error.error_code(), &error.to_string(), "file" => file_path);
                Err(error)
            }
        }
    }

    fn log_success(&self, result: &FileProcessingResult) {
        let file = result.metadata.path.display();

        if self.enable_performance_logging {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "Model file read",
                "file" => file,
                "size" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "duration_ms" => format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0),
                "mb_per_sec" => format!("{:.2}", result.throughput_mb_per_sec())
            );
        } else {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "Model file read",
                "file" => file,
                "lines" => result.metadata.line_count
            );
        }
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

fn read_model(file_path: &str, start_time: Instant) -> Result<FileProcessingResult, FileProcessorError> {
    let path = resolve_path(file_path)?;

    let fs_metadata = fs::metadata(&path).map_err(|e| FileProcessorError::from_io(&path, &e))?;
    let size = fs_metadata.len();
    if size > MAX_FILE_SIZE {
        return Err(FileProcessorError::FileTooLarge {
            size,
            max_size: MAX_FILE_SIZE,
        });
    }
    if size == 0 {
        return Err(FileProcessorError::EmptyFile {
            path: path.display().to_string(),
        });
    }

    let source = fs::read_to_string(&path).map_err(|e| FileProcessorError::from_io(&path, &e))?;

    let line_count = source.lines().count();
    if line_count > MAX_LINE_COUNT {
        return Err(FileProcessorError::TooManyLines {
            lines: line_count,
            max_lines: MAX_LINE_COUNT,
        });
    }

    Ok(FileProcessingResult {
        source,
        metadata: FileMetadata {
            path,
            size,
            line_count,
            modified: fs_metadata.modified().ok().map(DateTime::<Utc>::from),
        },
        processing_duration: start_time.elapsed(),
    })
}

/// Check that `file_path` names an existing regular file and canonicalize it
fn resolve_path(file_path: &str) -> Result<PathBuf, FileProcessorError> {
    if file_path.is_empty() {
        return Err(FileProcessorError::InvalidPath {
            path: String::new(),
        });
    }

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(FileProcessorError::FileNotFound {
            path: file_path.to_string(),
        });
    }
    if !path.is_file() {
        return Err(FileProcessorError::InvalidPath {
            path: file_path.to_string(),
        });
    }

    path.canonicalize()
        .map_err(|e| FileProcessorError::from_io(path, &e))
}
