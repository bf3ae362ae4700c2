use crate::dataset::Language;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_ROOT: &str = "data/raw_repo";

#[derive(Parser, Debug)]
#[command(name = "docsynth")]
#[command(
    about = "Build code catalogs and reasoning datasets from Python repositories",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Hide progress bars (also set by DOCSYNTH_QUIET)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (defaults to the nearest .docsynth.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a repository and write its chunk catalog and statistics
    Catalog {
        /// Repository root to scan
        #[arg(default_value = DEFAULT_ROOT)]
        root: PathBuf,

        /// Output directory (defaults to [output].catalog_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate train/dev/test JSONL datasets from a repository
    Generate {
        /// Repository root to scan
        #[arg(default_value = DEFAULT_ROOT)]
        root: PathBuf,

        /// Output directory (defaults to [output].dataset_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Random seed for selection and splitting
        #[arg(long)]
        seed: Option<u64>,

        /// Number of fact QA samples to request
        #[arg(long = "n-qa")]
        n_qa: Option<usize>,

        /// Number of design samples to request
        #[arg(long = "n-design")]
        n_design: Option<usize>,

        /// Language of the generated text
        #[arg(long, value_enum)]
        language: Option<Language>,

        /// Repository name stamped on every sample
        #[arg(long = "repo-name")]
        repo_name: Option<String>,
    },

    /// Check every record of a JSONL file against the sample schema
    Validate {
        /// JSONL file to check
        path: PathBuf,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_init_command() {
        let cli = Cli::try_parse_from(["docsynth", "init", "--force"]).unwrap();
        match cli.command {
            Commands::Init { force } => assert!(force),
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_catalog_root_defaults() {
        let cli = Cli::try_parse_from(["docsynth", "catalog"]).unwrap();
        match cli.command {
            Commands::Catalog { root, output } => {
                assert_eq!(root, PathBuf::from(DEFAULT_ROOT));
                assert!(output.is_none());
            }
            _ => panic!("Expected Catalog command"),
        }
    }

    #[test]
    fn test_generate_overrides_and_global_flags() {
        let cli = Cli::try_parse_from([
            "docsynth",
            "generate",
            "repo",
            "--seed",
            "7",
            "--n-qa",
            "10",
            "--language",
            "en",
            "-vv",
            "--config",
            "custom.toml",
        ])
        .unwrap();
        assert_eq!(cli.verbosity, 2);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        match cli.command {
            Commands::Generate {
                root,
                seed,
                n_qa,
                n_design,
                language,
                ..
            } => {
                assert_eq!(root, PathBuf::from("repo"));
                assert_eq!(seed, Some(7));
                assert_eq!(n_qa, Some(10));
                assert_eq!(n_design, None);
                assert_eq!(language, Some(Language::En));
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_validate_requires_path() {
        assert!(Cli::try_parse_from(["docsynth", "validate"]).is_err());
        let cli = Cli::try_parse_from(["docsynth", "validate", "train.jsonl"]).unwrap();
        match cli.command {
            Commands::Validate { path } => assert_eq!(path, PathBuf::from("train.jsonl")),
            _ => panic!("Expected Validate command"),
        }
    }
}
