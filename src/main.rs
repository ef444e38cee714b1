mod cli;

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use sitecards::config::Config;
use sitecards::mapping::site_json_url;
use sitecards::SiteCards;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sitecards=info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref()).context("loading config")?;
    config.apply_env().context("reading SITECARDS_* environment")?;
    if let Some(locale) = &cli.locale {
        config.locale = locale.parse().context("parsing --locale")?;
    }

    match cli.command {
        Commands::Render { endpoint, output, title } => {
            if let Some(title) = title {
                config.title = title;
            }
            let app = SiteCards::connect(config)?;
            let html = app.render_site(endpoint.as_deref()).await;
            emit(&html, output.as_deref()).await?;
        }
        Commands::Check { endpoint } => {
            let app = SiteCards::connect(config)?;
            let panel = app.query(endpoint.as_deref()).await;
            let state = panel.state();
            if !state.error_message.is_empty() {
                bail!("{}: {}", state.endpoint, state.error_message);
            }
            if let Some(site) = panel.site_card_props() {
                println!("site: {} ({} items)", site.title.unwrap_or_default(), state.items.len());
            }
            for card in panel.item_card_props() {
                println!(
                    "  {} -> {}{}",
                    card.title.unwrap_or_default(),
                    card.page_link.unwrap_or_default(),
                    card.date_updated.map(|d| format!(" (updated {d})")).unwrap_or_default()
                );
            }
        }
        Commands::Validate { endpoint } => {
            let mut panel = SiteCards::connect(config)?.panel();
            if let Err(e) = panel.validate(&endpoint) {
                bail!("{e}");
            }
            println!("ok: {}", site_json_url(&endpoint));
        }
    }
    Ok(())
}

async fn emit(html: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            tokio::fs::write(path, html)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "page written");
        }
        None => print!("{html}"),
    }
    Ok(())
}
