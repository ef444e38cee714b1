use crate::card::CardProps;
use crate::dates::{format_date, Locale};
use crate::types::{scalar_text, ItemRecord, Manifest};

const MANIFEST_FILE: &str = "site.json";

fn non_empty(s: String) -> Option<String> {
    Some(s).filter(|s| !s.trim().is_empty())
}

/// Site root with exactly one trailing slash; a trailing `/site.json` path segment is dropped.
pub fn base_url(endpoint: &str) -> String {
    let trimmed = endpoint.trim();
    let root = trimmed
        .strip_suffix(MANIFEST_FILE)
        .filter(|r| r.ends_with('/'))
        .unwrap_or(trimmed);
    format!("{}/", root.trim_end_matches('/'))
}

/// Where the manifest for `endpoint` lives.
pub fn site_json_url(endpoint: &str) -> String {
    format!("{}{}", base_url(endpoint), MANIFEST_FILE)
}

/// Absolute http(s) and protocol-relative references pass through; other schemes are
/// dropped and anything relative hangs off `base`.
pub fn resolve_against(base: &str, reference: &str) -> Option<String> {
    let r = reference.trim();
    if r.is_empty() {
        return None;
    }
    if r.starts_with("//") {
        return Some(r.to_string());
    }
    match url::Url::parse(r) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => Some(r.to_string()),
        Ok(_) => None,
        Err(_) => Some(format!("{}{}", base, r.trim_start_matches('/'))),
    }
}

fn join(base: &str, path: Option<&str>) -> Option<String> {
    let p = path?.trim();
    if p.is_empty() {
        return None;
    }
    Some(format!("{}{}", base, p.trim_start_matches('/')))
}

pub fn site_card_from_manifest(base: &str, m: &Manifest, locale: Locale) -> CardProps {
    let site = &m.metadata.site;
    let theme = &m.metadata.theme;
    CardProps {
        title: non_empty(m.title.clone()),
        description: m.description.clone().and_then(non_empty),
        logo: site.logo.as_deref().and_then(|l| resolve_against(base, l)),
        image_src: None,
        date_created: non_empty(format_date(site.created.as_ref(), locale)),
        date_updated: non_empty(format_date(site.updated.as_ref(), locale)),
        page_link: None,
        page_html: None,
        read_time: None,
        hex_code: theme.variables.hex_code.clone().and_then(non_empty),
        theme: theme.name.clone().and_then(non_empty),
        icon: theme.variables.icon.clone().and_then(non_empty),
        url: Some(base.to_string()),
    }
}

pub fn item_card_from_record(base: &str, item: &ItemRecord, locale: Locale) -> CardProps {
    let meta = &item.metadata;
    CardProps {
        title: item.title.clone().and_then(non_empty),
        description: item.description.clone().and_then(non_empty),
        logo: None,
        image_src: meta.image.as_deref().and_then(|i| resolve_against(base, i)),
        date_created: non_empty(format_date(meta.created.as_ref(), locale)),
        date_updated: non_empty(format_date(meta.updated.as_ref(), locale)),
        page_link: join(base, item.slug.as_deref()),
        page_html: join(base, item.location.as_deref()),
        read_time: scalar_text(meta.readtime.as_ref()),
        hex_code: None,
        theme: None,
        icon: None,
        url: None,
    }
}
