//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "coursekb")]
#[command(version)]
#[command(about = "Knowledge-based course recommendations with constraint relaxation", long_about = None)]
pub struct Cli {
    /// Suppress console progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Recommend courses from a JSON catalog
    Recommend {
        /// JSON array of course records
        #[arg(short, long, value_name = "FILE")]
        catalog: PathBuf,

        /// Filter object, inline JSON or a path to a JSON file
        #[arg(short, long, value_name = "JSON|FILE", default_value = "{}")]
        filters: String,

        /// Recommender configuration (TOML or YAML); defaults to ./coursekb.toml if present
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Maximum number of results
        #[arg(short = 'n', long, value_name = "N")]
        top: Option<usize>,

        /// Pretty-print the JSON response
        #[arg(long)]
        pretty: bool,
    },

    /// Print the recommender status
    Status {
        /// Recommender configuration (TOML or YAML)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
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
    fn test_parse_recommend() {
        let cli = Cli::try_parse_from([
            "coursekb",
            "recommend",
            "--catalog",
            "courses.json",
            "--filters",
            r#"{"category":"Music"}"#,
            "--top",
            "5",
        ])
        .unwrap();

        assert!(!cli.quiet);
        match cli.command {
            Command::Recommend {
                catalog,
                filters,
                config,
                top,
                pretty,
            } => {
                assert_eq!(catalog, PathBuf::from("courses.json"));
                assert_eq!(filters, r#"{"category":"Music"}"#);
                assert_eq!(config, None);
                assert_eq!(top, Some(5));
                assert!(!pretty);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_filters_default_to_empty_object() {
        let cli = Cli::try_parse_from(["coursekb", "-q", "recommend", "-c", "courses.json"]).unwrap();

        assert!(cli.quiet);
        let Command::Recommend { filters, .. } = cli.command else {
            panic!("expected recommend");
        };
        assert_eq!(filters, "{}");
    }

    #[test]
    fn test_recommend_requires_catalog() {
        assert!(Cli::try_parse_from(["coursekb", "recommend"]).is_err());
    }

    #[test]
    fn test_parse_status() {
        let cli = Cli::try_parse_from(["coursekb", "status", "--config", "coursekb.toml"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Status { config: Some(ref path) } if path == &PathBuf::from("coursekb.toml")
        ));
    }
}
