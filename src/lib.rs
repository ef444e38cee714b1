pub mod card;
pub mod component;
pub mod config;
pub mod dates;
pub mod error;
pub mod i18n;
pub mod mapping;
pub mod markup;
pub mod page;
pub mod panel;
pub mod transport;
pub mod types;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::card::{CardProps, ContentCard};
    pub use crate::component::Component;
    pub use crate::config::Config;
    pub use crate::dates::Locale;
    pub use crate::error::PanelError;
    pub use crate::i18n::{Catalog, Translator};
    pub use crate::markup::Node;
    pub use crate::panel::{PanelState, Settlement, SiteQueryPanel};
    pub use crate::transport::{FetchResponse, HttpTransport, Transport};
    pub use crate::types::{ItemRecord, Manifest};
    pub use crate::SiteCards;
}

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::component::Component;
use crate::config::Config;
use crate::i18n::{Catalog, Translator};
use crate::page::render_document;
use crate::panel::{PanelState, SiteQueryPanel};
use crate::transport::{HttpTransport, Transport};

/// Library entry point. Owns the configuration, the transport and the string catalog.
pub struct SiteCards {
    config: Config,
    transport: Arc<dyn Transport>,
    i18n: Arc<dyn Translator>,
}

impl SiteCards {
    /// Build with the HTTP transport described by `config`.
    pub fn connect(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(&config.user_agent).context("building HTTP client")?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        let i18n: Arc<dyn Translator> = Arc::new(Catalog::with_overrides(&config.strings));
        Self { config, transport, i18n }
    }

    pub fn config(&self) -> &Config { &self.config }

    /// Fresh panel seeded from the configured endpoint.
    pub fn panel(&self) -> SiteQueryPanel {
        SiteQueryPanel::from_config(&self.config, self.i18n.clone())
    }

    /// Mount a panel, stage `endpoint` (or keep the configured one) and fetch it.
    /// Failures end up in the returned panel's state.
    pub async fn query(&self, endpoint: Option<&str>) -> SiteQueryPanel {
        let mut panel = self.panel();
        panel.mount(self.transport.as_ref()).await;
        // the eager fetch on mount already covered the configured endpoint
        let fetched = self.config.fetch_on_mount
            && endpoint.map_or(true, |ep| ep.trim() == panel.state().endpoint);
        if !fetched {
            if let Some(ep) = endpoint {
                panel.set_endpoint(ep);
            }
            if let Err(e) = panel.fetch_manifest(self.transport.as_ref()).await {
                tracing::info!(endpoint = %panel.state().endpoint, error = %e, "query failed");
            }
        }
        panel
    }

    /// Query `endpoint` and hand back only the resulting state.
    pub async fn inspect(&self, endpoint: Option<&str>) -> PanelState {
        self.query(endpoint).await.state().clone()
    }

    /// Query and render the panel as a standalone HTML document.
    pub async fn render_site(&self, endpoint: Option<&str>) -> String {
        let panel = self.query(endpoint).await;
        render_document(panel.title(), &panel.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::transport::FetchResponse;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTransport {
        urls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn get(&self, url: &str) -> Result<FetchResponse, TransportError> {
            self.urls.lock().unwrap().push(url.to_string());
            let body = json!({"title": "T", "items": [{"title": "A", "slug": "a"}]});
            Ok(FetchResponse { status: 200, body: body.to_string() })
        }
    }

    fn app(fetch_on_mount: bool) -> (SiteCards, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::default());
        let config = Config { endpoint: "https://example.com/".into(), fetch_on_mount, ..Config::default() };
        (SiteCards::with_transport(config, transport.clone()), transport)
    }

    #[tokio::test]
    async fn eager_mount_is_not_fetched_twice() {
        let (app, transport) = app(true);
        let panel = app.query(None).await;
        assert!(panel.state().manifest.is_some());
        assert_eq!(*transport.urls.lock().unwrap(), vec!["https://example.com/site.json".to_string()]);

        let _ = app.query(Some(" https://example.com/ ")).await;
        assert_eq!(transport.urls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn eager_mount_then_explicit_endpoint() {
        let (app, transport) = app(true);
        let panel = app.query(Some("https://other.test/docs")).await;
        assert_eq!(panel.state().endpoint, "https://other.test/docs");
        assert_eq!(
            *transport.urls.lock().unwrap(),
            vec!["https://example.com/site.json".to_string(), "https://other.test/docs/site.json".to_string()]
        );
    }

    #[tokio::test]
    async fn lazy_mount_fetches_once() {
        let (app, transport) = app(false);
        let _ = app.query(None).await;
        assert_eq!(transport.urls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn inspect_returns_settled_state() {
        let (app, _) = app(false);
        let state = app.inspect(Some("https://example.com/")).await;
        assert!(!state.loading);
        assert_eq!(state.error_message, "");
        assert_eq!(state.manifest.as_ref().map(|m| m.title.as_str()), Some("T"));
        assert_eq!(state.items.len(), 1);

        let state = app.inspect(Some("ftp://example.com/")).await;
        assert!(state.manifest.is_none());
        assert!(state.error_message.starts_with("Invalid URL"));
    }
}
