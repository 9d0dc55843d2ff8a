//! Generate command implementation
//!
//! Renders a single clip from command-line parameters and writes it as a WAV
//! file.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tonecraft_backend_audio::{generate, GenerateResult as AudioGenerateResult};
use tonecraft_spec::{
    validate_request, BackendError, BarsValue, GenerationRequest, SynthBudget, SynthParams,
    MAX_BARS,
};

use super::json_output::{error_codes, GenerateOutput, GenerateResult, JsonError};

/// Arguments for the generate command.
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub instrument: String,
    pub style: String,
    pub mode: String,
    pub bars: i64,
    /// RNG seed; random when absent.
    pub seed: Option<u32>,
    /// Output WAV path; derived from the parameters when absent.
    pub output: Option<String>,
    /// Budget profile name (default, strict).
    pub budget: Option<String>,
    /// Overrides the profile's bar limit.
    pub max_bars: Option<u32>,
    /// Emit machine-readable JSON instead of colored text.
    pub json: bool,
}

/// Run the generate command
///
/// # Returns
/// Exit code: 0 success, 1 invalid request, 2 generation or write error
pub fn run(args: &GenerateArgs) -> Result<ExitCode> {
    let start = Instant::now();

    let budget = match resolve_budget(args) {
        Ok(budget) => budget,
        Err(err) => return report_failure(args.json, vec![err], 1),
    };

    let request = GenerationRequest {
        seed: args.seed,
        ..GenerationRequest::new(
            args.instrument.as_str(),
            args.style.as_str(),
            args.mode.as_str(),
            BarsValue::Integer(args.bars),
        )
    };

    let params = match validate_request(&request, &budget) {
        Ok(params) => params,
        Err(err) => return report_failure(args.json, vec![JsonError::from(&err)], 1),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    if !args.json {
        print_header(&params, seed);
    }

    let result = match generate(&params, seed) {
        Ok(result) => result,
        Err(err) => {
            return report_failure(args.json, vec![JsonError::new(err.code(), err.message())], 2)
        }
    };

    let path = output_path(args.output.as_deref(), &params);
    if let Err(err) = write_output(&path, &result.wav.wav_data) {
        let error = JsonError::new(error_codes::FILE_WRITE, format!("{:#}", err));
        return report_failure(args.json, vec![error], 2);
    }

    let record = build_record(&path, &result, start.elapsed().as_millis() as u64);
    if args.json {
        print_json(&GenerateOutput::success(record))?;
    } else {
        print_summary(&record);
    }

    Ok(ExitCode::SUCCESS)
}

fn resolve_budget(args: &GenerateArgs) -> std::result::Result<SynthBudget, JsonError> {
    let mut budget = match args.budget.as_deref() {
        Some(name) => SynthBudget::by_name(name).ok_or_else(|| {
            JsonError::new(
                error_codes::UNKNOWN_BUDGET,
                format!("unknown budget profile '{}' (expected default or strict)", name),
            )
        })?,
        None => SynthBudget::default(),
    };
    if let Some(max_bars) = args.max_bars {
        if max_bars == 0 || max_bars > MAX_BARS {
            return Err(JsonError::new(
                error_codes::INVALID_MAX_BARS,
                format!("--max-bars must be between 1 and {}, got {}", MAX_BARS, max_bars),
            ));
        }
        budget.max_bars = max_bars;
    }
    Ok(budget)
}

/// Default output path: `<style>_<mode>_<instrument>.wav` in the working directory.
pub fn output_path(explicit: Option<&str>, params: &SynthParams) -> PathBuf {
    match explicit {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(format!(
            "{}_{}_{}.wav",
            params.style, params.mode, params.instrument
        )),
    }
}

fn write_output(path: &Path, wav_data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, wav_data)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn build_record(path: &Path, result: &AudioGenerateResult, duration_ms: u64) -> GenerateResult {
    GenerateResult {
        path: path.display().to_string(),
        instrument: result.params.instrument.to_string(),
        style: result.params.style.to_string(),
        mode: result.params.mode.to_string(),
        bars: result.params.bars,
        duration_seconds: result.wav.duration_seconds(),
        base_frequency: result.properties.base_frequency,
        seed: result.seed,
        size_bytes: result.wav.wav_data.len(),
        pcm_hash: result.wav.pcm_hash.clone(),
        duration_ms,
    }
}

fn print_header(params: &SynthParams, seed: u32) {
    println!(
        "{} {} {} {}",
        "Generating:".cyan().bold(),
        params.style,
        params.mode,
        format!("({})", params.instrument).dimmed()
    );
    println!(
        "{} {} ({} s)",
        "Bars:".cyan().bold(),
        params.bars,
        params.duration_seconds()
    );
    println!("{} {}", "Seed:".dimmed(), seed);
}

fn print_summary(record: &GenerateResult) {
    println!(
        "\n{} {} {}",
        "SUCCESS".green().bold(),
        record.path,
        format!("[{}ms]", record.duration_ms).dimmed()
    );
    println!(
        "  {} {:.1} Hz",
        "Base frequency:".dimmed(),
        record.base_frequency
    );
    println!("  {} {} bytes", "Size:".dimmed(), record.size_bytes);
    println!("  {} {}", "PCM hash:".dimmed(), record.pcm_hash);
}

fn report_failure(json: bool, errors: Vec<JsonError>, code: u8) -> Result<ExitCode> {
    if json {
        print_json(&GenerateOutput::failure(errors))?;
    } else {
        for error in &errors {
            eprintln!("{} [{}] {}", "error:".red().bold(), error.code, error.message);
        }
    }
    Ok(ExitCode::from(code))
}

fn print_json(output: &GenerateOutput) -> Result<()> {
    let json = serde_json::to_string_pretty(output).context("Failed to serialize JSON output")?;
    println!("{}", json);
    Ok(())
}
