mod args;
mod output;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use args::Cli;
use flagscan_core::{FlagParser, ObjectSchema};

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.debug);

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(&cli) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("{}", output::render_error(&e, !cli.no_color));
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let schema = ObjectSchema::from_path(&cli.schema)
        .with_context(|| format!("Failed to load schema {}", cli.schema.display()))?;

    let parser = FlagParser::new(schema, cli.parse_options());
    debug!(options = ?parser.options(), args = cli.args.len(), "parsing arguments");

    let value = if cli.tokens {
        Value::from(parser.tokenize(&cli.args))
    } else {
        Value::Object(parser.parse(&cli.args)?)
    };

    Ok(output::render_json(&value, cli.raw)?)
}

fn init_tracing(debug: bool) {
    // FLAGSCAN_LOG overrides the --debug level
    let filter = EnvFilter::try_from_env("FLAGSCAN_LOG").unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("flagscan=debug,flagscan_core=debug")
        } else {
            EnvFilter::new("flagscan=warn,flagscan_core=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
