//! Suggest command implementation
//!
//! Reads one suggestion request (JSON) from a file or stdin and prints the
//! response exactly as the server would send it.

use anyhow::{Context, Result};
use std::io::Read;
use std::process::ExitCode;

use crate::service::{suggest_json, to_response_json, ErrorResponse, ServiceConfig};

use super::json_output::error_codes;

/// Run the suggest command
///
/// # Arguments
/// * `input` - Path to the request JSON, or `None` / `"-"` for stdin
/// * `config` - Service configuration
/// * `pretty` - Pretty-print the response
///
/// # Returns
/// Exit code: 0 on a success response, 1 on an error response
pub fn run(input: Option<&str>, config: &ServiceConfig, pretty: bool) -> Result<ExitCode> {
    let body = match read_body(input) {
        Ok(body) => body,
        Err(err) => {
            let error = ErrorResponse::new(error_codes::FILE_READ, format!("{:#}", err), 400);
            print_response(&serde_json::to_string(&error)?, pretty)?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let result = suggest_json(&body, config);
    print_response(&to_response_json(&result), pretty)?;

    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn read_body(input: Option<&str>) -> Result<String> {
    match input {
        Some(path) if path != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file: {}", path)),
        _ => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read request from stdin")?;
            Ok(body)
        }
    }
}

fn print_response(json: &str, pretty: bool) -> Result<()> {
    if pretty {
        let value: serde_json::Value =
            serde_json::from_str(json).context("Failed to re-parse response JSON")?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", json);
    }
    Ok(())
}
