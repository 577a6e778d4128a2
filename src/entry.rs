use clap::{CommandFactory, FromArgMatches};

use crate::app::run_local;
use crate::args::LoadArgs;
use crate::config::{apply_config, load_config};
use crate::error::AppResult;

/// Parses the command line, merges the config file and runs one batch.
///
/// # Errors
///
/// Returns an error when arguments or config are invalid, the runtime cannot
/// start, or the batch report cannot be written.
pub fn run() -> AppResult<()> {
    let args = parse_args()?;

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_local(args))
}

fn parse_args() -> AppResult<LoadArgs> {
    let matches = LoadArgs::command().get_matches();
    let mut args = LoadArgs::from_arg_matches(&matches)?;

    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config);
    }

    Ok(args)
}
