use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Query a site's manifest and render it as cards
#[derive(Parser)]
#[command(name = "sitecards")]
#[command(about = "Fetch a site.json manifest and render its site and item cards", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the per-user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Date locale: en-US, en-GB, de-DE or iso
    #[arg(short, long, global = true)]
    pub locale: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a site and write the rendered HTML page
    Render {
        /// Site endpoint; the configured default when omitted
        endpoint: Option<String>,
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Panel heading
        #[arg(long)]
        title: Option<String>,
    },
    /// Fetch a site and print one line per card
    Check {
        endpoint: Option<String>,
    },
    /// Validate an endpoint URL without fetching
    Validate {
        endpoint: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_with_output_and_title() {
        let cli = Cli::try_parse_from(["sitecards", "render", "https://a.test/", "-o", "out.html", "--title", "Docs"]).unwrap();
        match cli.command {
            Commands::Render { endpoint, output, title } => {
                assert_eq!(endpoint.as_deref(), Some("https://a.test/"));
                assert_eq!(output, Some(PathBuf::from("out.html")));
                assert_eq!(title.as_deref(), Some("Docs"));
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn endpoint_is_optional_for_render_and_check() {
        let cli = Cli::try_parse_from(["sitecards", "check"]).unwrap();
        assert!(matches!(cli.command, Commands::Check { endpoint: None }));
        let cli = Cli::try_parse_from(["sitecards", "render"]).unwrap();
        assert!(matches!(cli.command, Commands::Render { endpoint: None, output: None, title: None }));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["sitecards", "check", "https://a.test/", "--locale", "de-DE", "-c", "cfg.toml"]).unwrap();
        assert_eq!(cli.locale.as_deref(), Some("de-DE"));
        assert_eq!(cli.config, Some(PathBuf::from("cfg.toml")));
        assert!(matches!(cli.command, Commands::Check { endpoint: Some(_) }));
    }

    #[test]
    fn validate_requires_endpoint() {
        assert!(Cli::try_parse_from(["sitecards", "validate"]).is_err());
        let cli = Cli::try_parse_from(["sitecards", "validate", "https://a.test/"]).unwrap();
        assert!(matches!(cli.command, Commands::Validate { endpoint } if endpoint == "https://a.test/"));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["sitecards"]).is_err());
        assert!(Cli::try_parse_from(["sitecards", "publish"]).is_err());
    }
}
