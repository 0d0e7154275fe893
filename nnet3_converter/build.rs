// build.rs: compile-time limits for the converter, read from config/<profile>.toml
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const PROFILE_VAR: &str = "NNET3_BUILD_PROFILE";
const CONFIG_DIR_VAR: &str = "NNET3_CONFIG_DIR";

#[derive(Deserialize)]
struct Limits {
    file_processing: FileLimits,
    parsing: ParserLimits,
    logging: LogLimits,
}

#[derive(Deserialize)]
struct FileLimits {
    max_file_size: u64,
    max_line_count: usize,
}

#[derive(Deserialize)]
struct ParserLimits {
    max_tensor_elements: usize,
    max_components: usize,
}

#[derive(Deserialize)]
struct LogLimits {
    log_buffer_size: usize,
}

impl Limits {
    /// Every violated bound, so one build reports them all
    fn violations(&self, profile: &str) -> Vec<String> {
        const GIB: u64 = 1024 * 1024 * 1024;
        let mut problems = Vec::new();

        if self.file_processing.max_file_size > 4 * GIB {
            problems.push("file_processing.max_file_size is above 4 GiB".to_string());
        }
        if profile == "production" && self.file_processing.max_file_size > GIB {
            problems.push("file_processing.max_file_size is above 1 GiB for production".to_string());
        }
        if self.parsing.max_tensor_elements > 1_000_000_000 {
            problems.push("parsing.max_tensor_elements is above 1e9".to_string());
        }
        for (name, value) in [
            ("file_processing.max_line_count", self.file_processing.max_line_count),
            ("parsing.max_tensor_elements", self.parsing.max_tensor_elements),
            ("parsing.max_components", self.parsing.max_components),
            ("logging.log_buffer_size", self.logging.log_buffer_size),
        ] {
            if value == 0 {
                problems.push(format!("{} must be non-zero", name));
            }
        }

        problems
    }

    fn render(&self, source: &Path) -> String {
        format!(
            "// Generated by build.rs from {source}; do not edit

pub mod compile_time {{
    pub mod file_processing {{
        pub const MAX_FILE_SIZE: u64 = {max_file_size};
        pub const MAX_LINE_COUNT: usize = {max_line_count};
    }}

    pub mod parsing {{
        pub const MAX_TENSOR_ELEMENTS: usize = {max_tensor_elements};
        pub const MAX_COMPONENTS: usize = {max_components};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {log_buffer_size};
    }}
}}
",
            source = source.display(),
            max_file_size = self.file_processing.max_file_size,
            max_line_count = self.file_processing.max_line_count,
            max_tensor_elements = self.parsing.max_tensor_elements,
            max_components = self.parsing.max_components,
            log_buffer_size = self.logging.log_buffer_size,
        )
    }
}

/// config/<profile>.toml at the workspace root, one level above this crate
fn limits_path(profile: &str) -> PathBuf {
    let config_dir = env::var(CONFIG_DIR_VAR).unwrap_or_else(|_| "config".to_string());
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let workspace_root = manifest_dir.parent().unwrap_or(&manifest_dir).to_path_buf();
    workspace_root
        .join(config_dir)
        .join(format!("{}.toml", profile))
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed={}", PROFILE_VAR);
    println!("cargo:rerun-if-env-changed={}", CONFIG_DIR_VAR);

    let profile = env::var(PROFILE_VAR).unwrap_or_else(|_| "development".to_string());
    let path = limits_path(&profile);
    println!("cargo:rerun-if-changed={}", path.display());

    let text = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read limits file {}: {}", path.display(), e));
    let limits: Limits = toml::from_str(&text)
        .unwrap_or_else(|e| panic!("invalid limits file {}: {}", path.display(), e));

    let problems = limits.violations(&profile);
    if !problems.is_empty() {
        panic!("{} ({} profile):\n  {}", path.display(), profile, problems.join("\n  "));
    }

    let out = PathBuf::from(env::var("OUT_DIR").unwrap()).join("constants.rs");
    fs::write(&out, limits.render(&path))
        .unwrap_or_else(|e| panic!("cannot write {}: {}", out.display(), e));
}
