//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Analyze Python source structure and generate Mermaid diagrams
#[derive(Parser, Debug)]
#[command(name = "codeviz")]
#[command(about = "Analyze Python source structure and generate Mermaid diagrams")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a Python source file and write the results
    Analyze {
        /// Path to the source file
        path: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "./codeviz-out")]
        output: PathBuf,

        /// Output format (json, markdown, html)
        #[arg(long, default_value = "json")]
        format: String,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Skip diagram generation
        #[arg(long)]
        no_diagrams: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Serve the analyzer as an HTTP API
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to serve on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_defaults() {
        let args = Args::try_parse_from(["codeviz", "analyze", "main.py"]).unwrap();
        match args.command {
            Command::Analyze {
                path,
                output,
                format,
                no_diagrams,
                ..
            } => {
                assert_eq!(path, PathBuf::from("main.py"));
                assert_eq!(output, PathBuf::from("./codeviz-out"));
                assert_eq!(format, "json");
                assert!(!no_diagrams);
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_analyze_with_options() {
        let args = Args::try_parse_from([
            "codeviz",
            "analyze",
            "service.py",
            "--output",
            "/tmp/out",
            "--format",
            "html",
            "--config",
            "custom.toml",
            "--no-diagrams",
            "--verbose",
        ])
        .unwrap();

        match args.command {
            Command::Analyze {
                path,
                output,
                format,
                config,
                no_diagrams,
                verbose,
            } => {
                assert_eq!(path, PathBuf::from("service.py"));
                assert_eq!(output, PathBuf::from("/tmp/out"));
                assert_eq!(format, "html");
                assert_eq!(config, Some(PathBuf::from("custom.toml")));
                assert!(no_diagrams);
                assert!(verbose);
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_serve_defaults() {
        let args = Args::try_parse_from(["codeviz", "serve"]).unwrap();
        match args.command {
            Command::Serve { host, port, config } => {
                assert!(host.is_none());
                assert!(port.is_none());
                assert!(config.is_none());
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_serve_with_overrides() {
        let args =
            Args::try_parse_from(["codeviz", "serve", "--host", "0.0.0.0", "--port", "3000"])
                .unwrap();
        match args.command {
            Command::Serve { host, port, .. } => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(3000));
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_version_command() {
        let args = Args::try_parse_from(["codeviz", "version"]).unwrap();
        assert!(matches!(args.command, Command::Version));
    }
}
