//! CPF check mode
//!
//! Prints the verdict on stdout and reports it through the exit code.

use crate::{types::CpfValidationResponse, validation::cpf};
use anyhow::Result;
use std::process::ExitCode;

/// Arguments for CPF mode
#[derive(Debug, Default)]
pub struct CpfArgs {
    pub cpf: Option<String>,
    pub json: bool,
}

/// Validate one CPF
///
/// Exits with `SUCCESS` when valid and `FAILURE` otherwise.
pub fn run_cpf_mode(args: CpfArgs) -> Result<ExitCode> {
    let Some(input) = args.cpf else {
        anyhow::bail!("No CPF given. Pass --cpf <CPF> or run `session-gate --help`");
    };

    let report = check(&input);
    if args.json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", render_text(&report));
    }

    Ok(if report.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn check(input: &str) -> CpfValidationResponse {
    CpfValidationResponse {
        cpf: cpf::normalize(input),
        valid: cpf::is_valid(input),
        formatted: cpf::format(input),
    }
}

fn render_text(report: &CpfValidationResponse) -> String {
    let shown = report.formatted.as_deref().unwrap_or(&report.cpf);
    let verdict = if report.valid { "valid" } else { "invalid" };
    format!("{}: {}", shown, verdict)
}
