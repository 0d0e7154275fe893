mod error;
pub mod output;
mod result;

pub use error::PipelineError;
pub use output::PipelineOutput;
pub use result::PipelineResult;

use crate::config::runtime::{ParserPreferences, RuntimeConfig};
use crate::declarations::read_components;
use crate::file_processor::FileProcessor;
use crate::lexical::{LineCursor, ReaderLines, TextLines};
use crate::logging;
use std::io::BufRead;
use std::path::PathBuf;
use std::time::Instant;

/// Process a model file (file -> component section) with default preferences
pub fn process_file(file_path: &str) -> Result<PipelineResult, PipelineError> {
    process_file_with_config(file_path, &RuntimeConfig::default())
}

/// Process a model file with explicit runtime preferences
pub fn process_file_with_config(
    file_path: &str,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(PathBuf::from(file_path), || {
        crate::log_info!("Starting model conversion pipeline", "file" => file_path);

        // Stage 1: File processing
        let processor = FileProcessor::from_preferences(&config.file_processor);
        let file_result = processor.process_file(file_path)?;

        // Stage 2: Component section
        let mut cursor = LineCursor::new(TextLines::new(&file_result.source));
        let components = read_components(&mut cursor, &config.parser).map_err(log_parse_error)?;

        let result = PipelineResult::new(
            components,
            Some(file_result.metadata),
            start_time.elapsed(),
        );
        result.log_success(file_path);

        Ok(result)
    })
}

/// Process in-memory model text
pub fn process_source(source: &str) -> Result<PipelineResult, PipelineError> {
    process_source_with_preferences(source, &ParserPreferences::default())
}

pub fn process_source_with_preferences(
    source: &str,
    preferences: &ParserPreferences,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    let mut cursor = LineCursor::new(TextLines::new(source));
    let components = read_components(&mut cursor, preferences).map_err(log_parse_error)?;

    let result = PipelineResult::new(components, None, start_time.elapsed());
    result.log_success("<memory>");
    Ok(result)
}

/// Process a model streamed from a reader, one line at a time
pub fn process_reader<R: BufRead>(
    reader: R,
    preferences: &ParserPreferences,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    let mut cursor = LineCursor::new(ReaderLines::new(reader));
    let components = read_components(&mut cursor, preferences);

    // A failed read looks like end of input to the parser; report the cause
    if let Some(read_error) = cursor.source().read_error() {
        return Err(PipelineError::StreamRead {
            lines_read: cursor.lines_read(),
            message: read_error.to_string(),
        });
    }
    let components = components.map_err(log_parse_error)?;

    let result = PipelineResult::new(components, None, start_time.elapsed());
    result.log_success("<stream>");
    Ok(result)
}

fn log_parse_error(error: crate::lexical::ParseError) -> PipelineError {
    error.log();
    PipelineError::from(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::AttributeKey;
    use crate::lexical::ParseError;
    use crate::logging::{codes, LogLevel, LoggingService, MemoryLogger};
    use crate::values::AttributeValue;
    use assert_matches::assert_matches;
    use std::fs;
    use std::io::Cursor;
    use std::sync::Arc;
    use tempfile::tempdir;

    const MODEL: &str = "<Nnet3>
input-node name=input dim=2
component-node name=affine1 component=affine1 input=input
output-node name=output input=affine1

<NumComponents> 2
<ComponentName> affine1 <NaturalGradientAffineComponent> <MaxChange> 0.75 <LearningRate> 0.001 <LinearParams>  [
  1 2
  3 4
  5 6 ]
<BiasParams>  [ 0.1 0.2 0.3 ]
<RankIn> 20 <RankOut> 80 <UpdatePeriod> 4 <NumSamplesHistory> 2000 <Alpha> 4 <IsGradient> F </NaturalGradientAffineComponent>
<ComponentName> tdnn1 <TdnnComponent> <TimeOffsets> [ -1 0 1 ] <LinearParams> [
  1 1 1 ]
<BiasParams> [ ]
</TdnnComponent>
</Nnet3>
";

    #[test]
    fn test_process_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("final.mdl.txt");
        fs::write(&file_path, MODEL).unwrap();

        let result = process_file(file_path.to_str().unwrap()).unwrap();
        assert_eq!(result.component_count(), 2);
        assert_eq!(result.constant_count(), 3);
        assert!(result.file_metadata.is_some());

        let affine = result.find_component("affine1").unwrap();
        let params = affine.constant("affine1_params").unwrap();
        assert_eq!(params.shape, vec![2, 3]);
        assert_eq!(params.data, vec![1.0, 3.0, 5.0, 2.0, 4.0, 6.0]);

        let tdnn = result.find_component("tdnn1").unwrap();
        assert_eq!(tdnn.inputs(), &["tdnn1_params".to_string()]);
        assert_eq!(
            tdnn.attribute(AttributeKey::TimeOffsets),
            Some(&AttributeValue::IntVector(vec![-1, 0, 1]))
        );
    }

    #[test]
    fn test_process_source_and_reader_agree() {
        let preferences = ParserPreferences::default();
        let from_text = process_source_with_preferences(MODEL, &preferences).unwrap();
        let from_reader = process_reader(Cursor::new(MODEL), &preferences).unwrap();
        assert_eq!(from_text.components, from_reader.components);
        assert!(from_text.file_metadata.is_none());
    }

    #[test]
    fn test_stream_read_failure() {
        let mut bytes = b"<ComponentName> a <AffineComponent> <Dim> 2\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        assert_matches!(
            process_reader(Cursor::new(bytes), &ParserPreferences::default()),
            Err(PipelineError::StreamRead { lines_read: 1, .. })
        );
    }

    #[test]
    fn test_missing_file() {
        assert_matches!(
            process_file("does-not-exist.mdl.txt"),
            Err(PipelineError::FileProcessing(_))
        );
    }

    #[test]
    fn test_malformed_model_aborts() {
        let text = "<ComponentName> a <AffineComponent> <BiasParams> [ 1 x ]\n";
        assert_matches!(
            process_source(text),
            Err(PipelineError::Parse(ParseError::InvalidFloat { .. }))
        );
    }

    // The only test that installs the global logger
    #[test]
    fn test_parse_failure_is_logged_with_file_context() {
        let memory = Arc::new(MemoryLogger::with_capacity(10_000));
        logging::init_global_logging_with_service(Arc::new(LoggingService::new(
            memory.clone(),
            LogLevel::Debug,
        )))
        .unwrap();

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("broken.mdl.txt");
        fs::write(
            &file_path,
            "<ComponentName> a <AffineComponent>\n<BiasParams> [ 1 x ]\n",
        )
        .unwrap();
        let file_path = file_path.to_str().unwrap();

        assert_matches!(process_file(file_path), Err(PipelineError::Parse(_)));

        let logged: Vec<_> = memory
            .with_code(codes::parsing::INVALID_NUMBER)
            .into_iter()
            .filter(|event| event.context.get("file").map(String::as_str) == Some(file_path))
            .collect();
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].position.map(|at| at.line), Some(2));
        assert!(memory.contains_code(codes::success::FILE_PROCESSING_SUCCESS));
    }

    #[test]
    fn test_output_serialization() {
        let result = process_source(MODEL).unwrap();
        let output = PipelineOutput::new(&result);
        let json: serde_json::Value = serde_json::from_str(&output.to_json().unwrap()).unwrap();

        assert_eq!(json["component_count"], 2);
        assert_eq!(json["components"][0]["name"], "affine1");
        assert_eq!(json["components"][0]["type_tag"], "NaturalGradientAffineComponent");
        assert_eq!(json["components"][0]["inputs"][1], "affine1_bias");
        assert_eq!(json["components"][0]["constants"]["affine1_params"]["shape"][0], 2);
        assert_eq!(json["components"][1]["attributes"]["time_offsets"][0], -1);
        assert!(json["components"][1]["dim"].is_null());
    }
}
