//! Search panel: owns the endpoint, the fetch lifecycle and the current result set.
//!
//! A fetch is split into `begin_fetch` (validate, flip `loading`, hand out a
//! ticket) and `settle` (apply the response). Every dispatch bumps a
//! generation counter and `settle` drops tickets from older generations, so an
//! earlier request that resolves late never overwrites a newer result.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::card::{CardProps, ContentCard};
use crate::component::Component;
use crate::config::Config;
use crate::dates::Locale;
use crate::error::{PanelError, TransportError};
use crate::i18n::Translator;
use crate::mapping::{base_url, item_card_from_record, site_card_from_manifest, site_json_url};
use crate::markup::Node;
use crate::transport::{FetchResponse, Transport};
use crate::types::{manifest_from_value, ItemRecord, Manifest};

/// Observable panel state. Two panels with equal `PanelState` render identically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelState {
    pub endpoint: String,
    pub loading: bool,
    pub manifest: Option<Manifest>,
    pub items: Vec<ItemRecord>,
    pub error_message: String,
}

/// Handle for one dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    url: String,
}

impl FetchTicket {
    pub fn url(&self) -> &str { &self.url }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    Loaded,
    Failed(PanelError),
    /// A newer request was dispatched after this one; nothing changed.
    Stale,
}

pub struct SiteQueryPanel {
    title: String,
    draft: String,
    state: PanelState,
    generation: u64,
    locale: Locale,
    fetch_on_mount: bool,
    i18n: Arc<dyn Translator>,
}

impl SiteQueryPanel {
    pub fn new(title: &str, endpoint: &str, locale: Locale, i18n: Arc<dyn Translator>) -> Self {
        let seed = endpoint.trim().to_string();
        Self {
            title: title.to_string(),
            draft: seed.clone(),
            state: PanelState { endpoint: seed, ..Default::default() },
            generation: 0,
            locale,
            fetch_on_mount: false,
            i18n,
        }
    }

    pub fn from_config(config: &Config, i18n: Arc<dyn Translator>) -> Self {
        let mut p = Self::new(&config.title, &config.endpoint, config.locale, i18n);
        p.fetch_on_mount = config.fetch_on_mount;
        p
    }

    pub fn state(&self) -> &PanelState { &self.state }
    pub fn title(&self) -> &str { &self.title }
    /// Text typed into the endpoint field but not yet committed by a fetch.
    pub fn draft(&self) -> &str { &self.draft }

    /// Stage typed input. Committed to `endpoint` on the next fetch.
    pub fn set_endpoint(&mut self, raw: &str) {
        self.draft = raw.trim().to_string();
        self.updated();
    }

    /// Check that `endpoint` is an absolute http(s) URL. Sets or clears `error_message`.
    pub fn validate(&mut self, endpoint: &str) -> Result<(), PanelError> {
        let result = check_endpoint(endpoint);
        match &result {
            Ok(()) => self.state.error_message.clear(),
            Err(e) => self.state.error_message = e.to_string(),
        }
        result
    }

    /// Commit the draft endpoint and, if it validates, mark the panel as loading.
    /// A rejected endpoint still supersedes any request already in flight.
    pub fn begin_fetch(&mut self) -> Result<FetchTicket, PanelError> {
        self.generation += 1;
        self.state.endpoint = self.draft.clone();
        let endpoint = self.state.endpoint.clone();
        if let Err(e) = self.validate(&endpoint) {
            debug!(%endpoint, error = %e, "endpoint rejected");
            self.fail(e.clone());
            return Err(e);
        }

        self.state.loading = true;
        self.state.manifest = None;
        self.state.items.clear();
        self.state.error_message.clear();
        let ticket = FetchTicket { generation: self.generation, url: site_json_url(&endpoint) };
        debug!(url = %ticket.url, generation = ticket.generation, "dispatch");
        self.updated();
        Ok(ticket)
    }

    /// Apply the outcome of a dispatched request.
    pub fn settle(&mut self, ticket: FetchTicket, outcome: Result<FetchResponse, TransportError>) -> Settlement {
        if ticket.generation != self.generation {
            debug!(url = %ticket.url, generation = ticket.generation, current = self.generation, "dropping stale response");
            return Settlement::Stale;
        }
        match classify(outcome) {
            Ok(manifest) => {
                debug!(url = %ticket.url, items = manifest.items.len(), "manifest loaded");
                self.state.items = manifest.items.clone();
                self.state.manifest = Some(manifest);
                self.state.error_message.clear();
                self.state.loading = false;
                self.updated();
                Settlement::Loaded
            }
            Err(e) => {
                self.fail(e.clone());
                Settlement::Failed(e)
            }
        }
    }

    /// Validate, GET the manifest and settle. Failures are reflected in state and also returned.
    pub async fn fetch_manifest(&mut self, transport: &dyn Transport) -> Result<(), PanelError> {
        let ticket = self.begin_fetch()?;
        let outcome = transport.get(ticket.url()).await;
        match self.settle(ticket, outcome) {
            Settlement::Loaded | Settlement::Stale => Ok(()),
            Settlement::Failed(e) => Err(e),
        }
    }

    /// Run the mount hook and the eager fetch when configured.
    pub async fn mount(&mut self, transport: &dyn Transport) {
        self.mounted();
        if self.fetch_on_mount {
            let _ = self.fetch_manifest(transport).await;
        }
    }

    fn fail(&mut self, e: PanelError) {
        self.state.manifest = None;
        self.state.items.clear();
        self.state.error_message = e.to_string();
        self.state.loading = false;
        self.updated();
    }

    pub fn site_card_props(&self) -> Option<CardProps> {
        let m = self.state.manifest.as_ref()?;
        Some(site_card_from_manifest(&base_url(&self.state.endpoint), m, self.locale))
    }

    pub fn item_card_props(&self) -> Vec<CardProps> {
        let base = base_url(&self.state.endpoint);
        self.state.items.iter().map(|i| item_card_from_record(&base, i, self.locale)).collect()
    }

    fn search_form(&self) -> Node {
        Node::element("details")
            .flag("open")
            .child(Node::element("summary").child_text(self.i18n.translate("search-input")))
            .child(Node::element("label").attr("for", "input").child_text(self.i18n.translate("search-label")))
            .child(
                Node::element("input")
                    .attr("type", "text")
                    .attr("id", "input")
                    .attr("name", "endpoint")
                    .attr("value", self.draft.clone()),
            )
            .child(Node::element("button").attr("type", "button").child_text(self.i18n.translate("analyze")))
    }
}

fn check_endpoint(endpoint: &str) -> Result<(), PanelError> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return Err(PanelError::EmptyInput);
    }
    let url = Url::parse(endpoint).map_err(|e| PanelError::MalformedUrl(format!("{endpoint} ({e})")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(PanelError::MalformedUrl(format!("{endpoint} (unsupported scheme {other})"))),
    }
}

fn classify(outcome: Result<FetchResponse, TransportError>) -> Result<Manifest, PanelError> {
    let resp = outcome.map_err(|e| {
        warn!(error = %e, "transport failure");
        PanelError::from(e)
    })?;
    if !resp.is_success() {
        return Err(PanelError::NetworkFailure(format!("Request failed with status {}", resp.status)));
    }
    let body: Value = serde_json::from_str(&resp.body).map_err(|e| {
        debug!(error = %e, "body is not JSON");
        PanelError::SchemaViolation
    })?;
    manifest_from_value(body).ok_or(PanelError::SchemaViolation)
}

impl Component for SiteQueryPanel {
    fn render(&self) -> Node {
        let mut root = Node::element("section")
            .attr("class", "site-query-panel")
            .child(Node::element("h2").child_text(self.title.clone()))
            .child(self.search_form());

        let s = &self.state;
        if s.loading {
            root = root.child(
                Node::element("div")
                    .attr("class", "loading")
                    .attr("role", "status")
                    .child_text(self.i18n.translate("loading")),
            );
        }
        if !s.error_message.is_empty() {
            root = root.child(
                Node::element("p").attr("class", "error").attr("role", "alert").child_text(s.error_message.clone()),
            );
        }
        if s.loading {
            return root;
        }

        match self.site_card_props() {
            None => root.child(
                Node::element("p").attr("class", "not-compatible").child_text(self.i18n.translate("not-compatible")),
            ),
            Some(site) => {
                let site_card = ContentCard::new(site, self.i18n.clone()).with_class("site-card").render();
                let items = self
                    .item_card_props()
                    .into_iter()
                    .map(|p| ContentCard::new(p, self.i18n.clone()).with_class("item-card").render());
                root.child(site_card).child(Node::element("div").attr("class", "results").children(items))
            }
        }
    }

    fn mounted(&mut self) {
        debug!(endpoint = %self.state.endpoint, "panel mounted");
    }

    fn updated(&mut self) {
        debug!(
            loading = self.state.loading,
            has_manifest = self.state.manifest.is_some(),
            items = self.state.items.len(),
            "panel updated"
        );
    }
}
