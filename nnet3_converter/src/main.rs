use nnet3_converter::config::runtime::{LogLevel, RuntimeConfig, RuntimeConfigError};
use nnet3_converter::logging::{codes, Code};
use nnet3_converter::{file_processor, logging, pipeline, PipelineOutput, PipelineResult};
use std::env;
use std::io;

/// Command line options after the input argument
#[derive(Debug, Default)]
struct CliOptions {
    json: bool,
    quiet: bool,
    config_path: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <model.txt|-> [options]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(&args[0]);
        return Ok(());
    }

    let options = parse_options(&args[2..]);

    let config = match load_config(&options) {
        Ok(config) => config,
        Err(error) => fail(&error.to_string(), error.error_code()),
    };

    // Preferences must be in place before the global service reads them
    if let Err(message) = logging::config::init_runtime_preferences(config.logging.clone())
        .and_then(|_| logging::init_global_logging())
        .and_then(|_| file_processor::init_file_processor_logging())
    {
        fail(&message, codes::system::INITIALIZATION_FAILURE);
    }

    let outcome = if args[1] == "-" {
        pipeline::process_reader(io::stdin().lock(), &config.parser)
    } else {
        pipeline::process_file_with_config(&args[1], &config)
    };

    match outcome {
        Ok(result) => {
            if options.json {
                println!("{}", PipelineOutput::new(&result).to_json()?);
            } else {
                print_summary(&args[1], &result);
                println!("\nSUCCESS: Component section converted");
            }
        }
        Err(error) => fail(&error.to_string(), error.error_code()),
    }

    Ok(())
}

/// Runtime preferences from `--config` or the environment; `--quiet` keeps only errors
fn load_config(options: &CliOptions) -> Result<RuntimeConfig, RuntimeConfigError> {
    let mut config = match &options.config_path {
        Some(path) => RuntimeConfig::from_toml_file(path)?,
        None => RuntimeConfig::default(),
    };
    if options.quiet {
        config.logging.min_log_level = LogLevel::Error;
    }
    Ok(config)
}

fn fail(message: &str, code: Code) -> ! {
    eprintln!("\nFAILED: {}", message);
    eprintln!("  Code: {}", code.as_str());
    std::process::exit(1);
}

fn print_help(program_name: &str) {
    println!("nnet3 converter v{}", env!("CARGO_PKG_VERSION"));
    println!("Reads the component section of a text nnet3 model into an intermediate form");
    println!();
    println!("USAGE:");
    println!("    {} <model.txt> [options]", program_name);
    println!("    {} - [options]            # Read the model from stdin", program_name);
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --json              Print the parsed components as JSON");
    println!("    --config <file>     Load runtime preferences from a TOML file");
    println!("    --quiet             Only log errors (logs always go to stderr)");
    println!();
    println!("BUILD CONFIGURATION:");
    println!("    {}", nnet3_converter::config::build_info::source_info());
    println!(
        "    Registered component types: {}",
        nnet3_converter::ComponentKind::registered_type_names()
            .collect::<Vec<_>>()
            .join(", ")
    );
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => {
                options.json = true;
            }
            "--quiet" => {
                options.quiet = true;
            }
            "--config" => {
                if i + 1 < args.len() {
                    options.config_path = Some(args[i + 1].clone());
                    i += 1;
                } else {
                    eprintln!("Warning: --config requires a file path");
                }
            }
            _ => {
                eprintln!("Warning: Unknown option '{}'", args[i]);
            }
        }
        i += 1;
    }

    options
}

fn print_summary(source: &str, result: &PipelineResult) {
    println!("Model: {}", source);
    if let Some(metadata) = &result.file_metadata {
        println!(
            "  Size: {} ({} lines)",
            metadata.human_readable_size(),
            metadata.line_count
        );
    }
    println!(
        "  Components: {}, constants: {}, time: {:.2}ms",
        result.component_count(),
        result.constant_count(),
        result.processing_duration.as_secs_f64() * 1000.0
    );

    if result.components.is_empty() {
        return;
    }

    println!();
    println!("  {:>4}  {:<24} {:<36} {:>6}  INPUTS", "ID", "NAME", "TYPE", "DIM");
    for component in &result.components {
        let dim = component
            .dim()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:>4}  {:<24} {:<36} {:>6}  {}",
            component.id(),
            component.name(),
            component.type_tag(),
            dim,
            component.inputs().join(", ")
        );
        for (name, tensor) in component.constants() {
            println!("          {} {:?}", name, tensor.shape);
        }
    }
}
