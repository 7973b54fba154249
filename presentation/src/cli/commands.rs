//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for lookup results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored, human readable view
    Pretty,
    /// One JSON object per render event
    Json,
}

/// CLI arguments for cnpj-lookup
#[derive(Parser, Debug)]
#[command(name = "cnpj-lookup")]
#[command(author, version, about = "Look up a Brazilian company across multiple registry sources")]
#[command(long_about = r#"
cnpj-lookup queries three public CNPJ registries at once and reconciles
their answers:

  CNPJ.ws     authoritative record, tried once
  BrasilAPI   retried up to 3 times, adds the tax regime history
  ReceitaWS   retried up to 2 times, adds state registrations

The first usable answer is shown immediately. The authoritative record
replaces a preliminary view when it arrives, and the tax regime consensus
is refined as every source reports.

Configuration files are loaded from (in priority order):
1. CNPJ_LOOKUP_* environment variables (e.g. CNPJ_LOOKUP_HTTP__TIMEOUT_SECONDS=5)
2. --config <path>     Explicit config file
3. ./cnpj-lookup.toml  Project-level config
4. ~/.config/cnpj-lookup/config.toml   Global config

Example:
  cnpj-lookup 11.222.333/0001-81
  cnpj-lookup -o json 11222333000181
  cnpj-lookup --interactive
"#)]
pub struct Cli {
    /// The CNPJ to look up, punctuation optional (not required in interactive mode)
    pub cnpj: Option<String>,

    /// Read one CNPJ per line; each line supersedes the previous lookup
    #[arg(short, long)]
    pub interactive: bool,

    /// Output format [default: pretty, or `output.format` from config]
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_single_lookup() {
        let cli = Cli::parse_from(["cnpj-lookup", "-vv", "-o", "json", "11.222.333/0001-81"]);
        assert_eq!(cli.cnpj.as_deref(), Some("11.222.333/0001-81"));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
        assert!(!cli.interactive);
    }

    #[test]
    fn test_parse_interactive() {
        let cli = Cli::parse_from(["cnpj-lookup", "--interactive", "-q", "--no-config"]);
        assert!(cli.interactive);
        assert!(cli.quiet);
        assert!(cli.no_config);
        assert!(cli.cnpj.is_none());
        assert!(cli.output.is_none());
    }
}
