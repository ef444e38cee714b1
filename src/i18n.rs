use std::collections::HashMap;

/// Lookup for user-visible strings, injected into components at construction.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

const ENGLISH: &[(&str, &str)] = &[
    ("description", "Description"),
    ("date-created", "Date Created"),
    ("last-updated", "Last Updated"),
    ("read-time", "Read Time"),
    ("minutes", "minutes"),
    ("theme", "Theme"),
    ("view-source", "View page source"),
    ("search-input", "Search input"),
    ("search-label", "Search articles in HAX:"),
    ("analyze", "Analyze"),
    ("loading", "Loading..."),
    ("not-compatible", "This site is not compatible with HAX"),
];

/// String table with built-in English defaults and optional overrides.
#[derive(Debug, Clone)]
pub struct Catalog {
    strings: HashMap<String, String>,
}

impl Catalog {
    pub fn english() -> Self {
        let strings = ENGLISH.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Self { strings }
    }

    /// English defaults with `overrides` layered on top.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut c = Self::english();
        for (k, v) in overrides {
            c.strings.insert(k.clone(), v.clone());
        }
        c
    }
}

impl Default for Catalog {
    fn default() -> Self { Self::english() }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> String {
        self.strings.get(key).cloned().unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_defaults_and_unknown_keys_echo() {
        let mut o = HashMap::new();
        o.insert("analyze".to_string(), "Analyser".to_string());
        let c = Catalog::with_overrides(&o);
        assert_eq!(c.translate("analyze"), "Analyser");
        assert_eq!(c.translate("theme"), "Theme");
        assert_eq!(c.translate("no-such-key"), "no-such-key");
    }
}
