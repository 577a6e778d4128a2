use super::parsers::parse_bool_env;
use super::test_support::parse_test_args;
use crate::error::{AppError, AppResult};

#[test]
fn parse_args_defaults() -> AppResult<()> {
    let args = parse_test_args(["userload"])?;

    let expected_no_color = std::env::var("NO_COLOR")
        .ok()
        .and_then(|value| parse_bool_env(&value).ok())
        .unwrap_or(false);

    let checks = [
        (args.url == "http://localhost:8080", "Unexpected url"),
        (args.requests == 200, "Unexpected requests"),
        (args.concurrency == 100, "Unexpected concurrency"),
        (args.min_id == 1, "Unexpected min_id"),
        (args.max_id == 10_000, "Unexpected max_id"),
        (!args.json_output, "Expected json_output to be false"),
        (args.output.is_none(), "Expected output to be None"),
        (args.seed.is_none(), "Expected seed to be None"),
        (!args.no_progress, "Expected no_progress to be false"),
        (!args.verbose, "Expected verbose to be false"),
        (args.no_color == expected_no_color, "Unexpected no_color default"),
        (args.config.is_none(), "Expected config to be None"),
    ];

    for (ok, message) in checks {
        if !ok {
            return Err(AppError::validation(message));
        }
    }
    Ok(())
}

#[test]
fn parse_args_short_flags() -> AppResult<()> {
    let args = parse_test_args([
        "userload",
        "--url",
        "http://127.0.0.1:9000",
        "-n",
        "50",
        "-c",
        "10",
        "--min-id",
        "1",
        "--max-id",
        "5",
        "--json-output",
        "--seed",
        "7",
    ])?;

    if args.url != "http://127.0.0.1:9000" {
        return Err(AppError::validation(format!("Unexpected url: {}", args.url)));
    }
    if args.requests != 50 || args.concurrency != 10 {
        return Err(AppError::validation(format!(
            "Unexpected counts: {} / {}",
            args.requests, args.concurrency
        )));
    }
    if args.min_id != 1 || args.max_id != 5 {
        return Err(AppError::validation(format!(
            "Unexpected id range: {}..={}",
            args.min_id, args.max_id
        )));
    }
    if !args.json_output || args.seed != Some(7) {
        return Err(AppError::validation("Expected json output and seed 7"));
    }
    Ok(())
}

#[test]
fn parse_args_accepts_negative_ids() -> AppResult<()> {
    let args = parse_test_args(["userload", "--min-id", "-10", "--max-id", "-1"])?;
    if args.min_id == -10 && args.max_id == -1 {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Unexpected id range: {}..={}",
            args.min_id, args.max_id
        )))
    }
}

#[test]
fn parse_args_zero_counts_reach_validation() -> AppResult<()> {
    // Zero is a valid integer for the parser; the batch config rejects it.
    let args = parse_test_args(["userload", "-n", "0", "-c", "0"])?;
    if args.requests == 0 && args.concurrency == 0 {
        Ok(())
    } else {
        Err(AppError::validation("Expected zero counts to parse"))
    }
}

#[test]
fn parse_args_rejects_negative_requests() -> AppResult<()> {
    if parse_test_args(["userload", "-n", "-5"]).is_ok() {
        return Err(AppError::validation("Expected negative request count to fail"));
    }
    Ok(())
}

#[test]
fn parse_bool_env_accepts_common_spellings() -> AppResult<()> {
    for value in ["1", "true", "YES", " on "] {
        if !parse_bool_env(value)? {
            return Err(AppError::validation(format!("Expected true for {}", value)));
        }
    }
    for value in ["0", "false", "No", "off"] {
        if parse_bool_env(value)? {
            return Err(AppError::validation(format!("Expected false for {}", value)));
        }
    }
    if parse_bool_env("maybe").is_ok() {
        return Err(AppError::validation("Expected 'maybe' to be rejected"));
    }
    Ok(())
}
