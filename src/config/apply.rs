use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::LoadArgs;

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments.
///
/// Flags given on the command line always win over file values.
pub fn apply_config(args: &mut LoadArgs, matches: &ArgMatches, config: &ConfigFile) {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = url;
    }

    if !is_cli(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = requests;
    }

    if !is_cli(matches, "concurrency")
        && let Some(concurrency) = config.concurrency
    {
        args.concurrency = concurrency;
    }

    if !is_cli(matches, "min_id")
        && let Some(min_id) = config.min_id
    {
        args.min_id = min_id;
    }

    if !is_cli(matches, "max_id")
        && let Some(max_id) = config.max_id
    {
        args.max_id = max_id;
    }

    if !is_cli(matches, "json_output")
        && let Some(json_output) = config.json_output
    {
        args.json_output = json_output;
    }

    if !is_cli(matches, "output")
        && let Some(output) = config.output.clone()
    {
        args.output = Some(output);
    }

    if !is_cli(matches, "seed")
        && let Some(seed) = config.seed
    {
        args.seed = Some(seed);
    }

    if !is_cli(matches, "no_progress")
        && let Some(no_progress) = config.no_progress
    {
        args.no_progress = no_progress;
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    if !is_set(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

/// True for values from the command line or the environment.
fn is_set(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}
