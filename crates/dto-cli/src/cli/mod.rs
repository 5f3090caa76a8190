use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for the `dtocheck` binary.
#[derive(Debug, Parser)]
#[command(
    name = "dtocheck",
    version,
    about = "Serialization round-trip and annotation audit for API entity models"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Entity model to check (defaults to `target.module` from config)
    #[arg(short, long, global = true)]
    pub module: Option<String>,

    /// Config file to use instead of ./dtocheck.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Stop at the first failing type
    #[arg(long, global = true)]
    pub fail_fast: bool,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List declared modules and the candidate types of the target module.
    List,
    /// Round-trip every candidate type.
    Verify,
    /// Check every candidate's field directives.
    Audit,
    /// Print the canonical encoding of one fabricated instance.
    Sample {
        /// Type name as registered in the module manifest
        type_name: String,
        /// Leave this top-level property null
        #[arg(long)]
        leave_null: Option<String>,
    },
    /// Verify, then audit.
    All,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["dtocheck", "verify", "--fail-fast", "--json", "-m", "dto_model"])
            .expect("cli should parse");
        assert!(cli.fail_fast);
        assert!(cli.json);
        assert_eq!(cli.module.as_deref(), Some("dto_model"));
        assert!(matches!(cli.command, Commands::Verify));
    }

    #[test]
    fn sample_takes_type_and_leave_null() {
        let cli = Cli::try_parse_from(["dtocheck", "sample", "Customer", "--leave-null", "phone"])
            .expect("cli should parse");
        match cli.command {
            Commands::Sample {
                type_name,
                leave_null,
            } => {
                assert_eq!(type_name, "Customer");
                assert_eq!(leave_null.as_deref(), Some("phone"));
            }
            other => panic!("expected sample, got {other:?}"),
        }
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["dtocheck", "-q", "-v", "list"]).is_err());
    }
}
