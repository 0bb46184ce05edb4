//! Command-line interface definitions
//!
//! Clap types only; the command implementations live in `main.rs`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INVALID_ARGS: i32 = 2;
    pub const UNKNOWN_GENERATOR: i32 = 3;
}

/// boxforge - Parametric box generator with a web front end
#[derive(Parser)]
#[command(name = "boxforge")]
#[command(version)]
#[command(about = "Generate laser-cutter-ready box drawings, via CLI or browser")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve(ServeArgs),

    /// List available generators
    List(ListArgs),

    /// Run a generator and write the drawing to a file
    Generate(GenerateArgs),

    /// Show version, configuration and environment information
    Info,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address to bind to
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Language used when requests do not pick one
    #[arg(short, long)]
    pub language: Option<String>,

    /// Restart the server when watched files change
    #[arg(long)]
    pub dev_reload: bool,

    /// Configuration file (default: ./boxforge.toml, then the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Include generators hidden from the web menu
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Generator name, e.g. ClosedBox
    pub name: String,

    /// Parameter assignment, repeatable: --set x=120 --set format=dxf
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Output file (default: <name>.<ext> in the working directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "boxforge",
            "serve",
            "--port",
            "9000",
            "--bind",
            "0.0.0.0",
            "--dev-reload",
        ])
        .unwrap();

        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(9000));
                assert_eq!(args.bind.as_deref(), Some("0.0.0.0"));
                assert!(args.dev_reload);
                assert!(args.language.is_none());
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_generate_collects_repeated_set_flags() {
        let cli = Cli::try_parse_from([
            "boxforge",
            "generate",
            "ClosedBox",
            "--set",
            "x=120",
            "--set",
            "format=dxf",
            "-o",
            "out.dxf",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.name, "ClosedBox");
                assert_eq!(args.set, vec!["x=120", "format=dxf"]);
                assert_eq!(args.output, Some(PathBuf::from("out.dxf")));
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_generate_requires_a_name() {
        assert!(Cli::try_parse_from(["boxforge", "generate"]).is_err());
    }

    #[test]
    fn test_list_defaults() {
        let cli = Cli::try_parse_from(["boxforge", "list"]).unwrap();
        match cli.command {
            Commands::List(args) => assert!(!args.all),
            _ => panic!("expected list"),
        }
    }
}
