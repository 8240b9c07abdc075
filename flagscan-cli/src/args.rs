use std::path::PathBuf;
use clap::Parser;

use flagscan_core::ParseOptions;

/// Command line arguments for the flagscan CLI
#[derive(Parser, Debug)]
#[command(author, version, about = "Tokenize command line flags and validate them against a schema")]
pub struct Cli {
    /// Schema document (JSON, or TOML with a .toml extension)
    #[arg(long, short)]
    pub schema: PathBuf,

    /// Reject flags the schema does not declare
    #[arg(long)]
    pub strict: bool,

    /// Keep flags the schema does not declare
    #[arg(long)]
    pub passthrough: bool,

    /// Print the tokenized flags without validating them
    #[arg(long)]
    pub tokens: bool,

    /// Output raw JSON
    #[arg(long, default_value_t = false)]
    pub raw: bool,

    /// Disable colored output
    #[arg(long, default_value_t = false)]
    pub no_color: bool,

    /// Enable verbose debug output
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Arguments to parse. Flags flagscan defines itself (such as `--debug`)
    /// are only forwarded when they come after `--` or a first positional.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Parser options requested on the command line.
    ///
    /// Passing both `--strict` and `--passthrough` is not rejected here; the
    /// parser reports the conflict.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            strict: self.strict,
            passthrough: self.passthrough,
        }
    }
}
