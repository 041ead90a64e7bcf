//! Doctor command - checks external programs and configuration

use anyhow::Result;
use owo_colors::OwoColorize;
use wt_core::{Config, GhCli, GitCli, Vcs};

use crate::colors::COLORS;
use crate::interaction::fzf_installed;
use crate::output::{DoctorData, DoctorSummary, HealthCheck, JsonResponse, OutputMode, print_json};

/// Run the doctor command
///
/// Exits 1 only when a check fails; warnings still exit 0.
pub fn run_doctor(out: OutputMode) -> Result<i32> {
    let (config_check, config) = check_config();
    let checks = vec![
        check_program("git", GitCli::is_installed(), true),
        check_program("fzf", fzf_installed(), false),
        check_program("gh", GhCli::new(".").is_installed(), false),
        config_check,
        check_repository(),
    ];

    let summary = summarize(&checks);
    let failed = summary.failures > 0;
    let data = DoctorData {
        checks,
        config,
        summary,
    };

    if out.json {
        let response = if failed {
            JsonResponse::error("doctor", data, vec![])
        } else {
            JsonResponse::ok("doctor", data)
        };
        print_json(&response);
    } else if !out.quiet {
        print_doctor_results(&data);
    }

    Ok(if failed { 1 } else { 0 })
}

fn print_doctor_results(data: &DoctorData) {
    for check in &data.checks {
        let icon = match check.status.as_str() {
            "pass" => "✓".style(COLORS.success).to_string(),
            "warn" => "⚠".style(COLORS.warning).to_string(),
            _ => "✗".style(COLORS.fail).to_string(),
        };
        println!("  {} {} - {}", icon, check.name, check.message);
    }

    if let Some(config) = &data.config {
        println!();
        println!("  worktrees_dir = {}", config.worktrees_dir.display());
        println!("  editor        = {}", config.editor);
        println!("  ai_command    = {}", config.ai_command);
    }

    println!();
    println!(
        "Summary: {} passed, {} warnings, {} failures",
        data.summary.passed, data.summary.warnings, data.summary.failures
    );
}

fn summarize(checks: &[HealthCheck]) -> DoctorSummary {
    DoctorSummary {
        passed: checks.iter().filter(|c| c.status == "pass").count(),
        warnings: checks.iter().filter(|c| c.status == "warn").count(),
        failures: checks.iter().filter(|c| c.status == "fail").count(),
    }
}

/// A missing required program fails; a missing optional one warns
fn check_program(name: &str, installed: bool, required: bool) -> HealthCheck {
    match (installed, required) {
        (true, _) => HealthCheck::new(name, "pass", format!("{} is installed", name)),
        (false, true) => HealthCheck::new(name, "fail", format!("{} is not on PATH", name)),
        (false, false) => HealthCheck::new(
            name,
            "warn",
            format!("{} is not on PATH; interactive commands need it", name),
        ),
    }
}

fn check_config() -> (HealthCheck, Option<Config>) {
    match Config::load() {
        Ok(config) => (
            HealthCheck::new("config", "pass", "configuration loaded"),
            Some(config),
        ),
        Err(e) => (HealthCheck::new("config", "fail", e.to_string()), None),
    }
}

fn check_repository() -> HealthCheck {
    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => return HealthCheck::new("repository", "warn", e.to_string()),
    };
    match GitCli::new(cwd).toplevel() {
        Ok(toplevel) => HealthCheck::new(
            "repository",
            "pass",
            format!("inside {}", toplevel.display()),
        ),
        Err(_) => HealthCheck::new("repository", "warn", "not inside a git repository"),
    }
}
