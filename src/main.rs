use std::{io, process};

use clap::Parser;
use sql_doc_lint::{
    app::{CheckParams, run_anchors, run_check},
    cli::{Cli, Commands},
    config::Config,
    error::AppResult
};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("sql_doc_lint=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> AppResult<i32> {
    match cli.command {
        Commands::Check {
            root,
            strict,
            output_format,
            config,
            no_color
        } => {
            let loaded = Config::load(config.as_deref())?;
            let params = CheckParams {
                root,
                strict,
                output_format,
                verbose: cli.verbose,
                no_color
            };
            let result = run_check(params, loaded)?;
            print!("{}", result.output);
            eprintln!("{}", result.summary);
            Ok(result.exit_code)
        }
        Commands::Anchors {
            file,
            json
        } => {
            print!("{}", run_anchors(&file, json)?);
            Ok(0)
        }
    }
}
