use crate::config::builtin::builtin_sites;
use crate::config::parser::load_config;
use crate::config::types::{ClientConfig, SiteSchema};
use crate::config::DEFAULT_LANGUAGE;
use crate::ScrapeError;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, LazyLock};

static BUILTIN: LazyLock<SchemaRegistry> = LazyLock::new(|| {
    let mut registry = SchemaRegistry::new();
    for site in builtin_sites() {
        registry.register(site);
    }
    registry
});

/// Lookup table from (fiction name, language) to site schema
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    sites: HashMap<(String, String), Arc<SiteSchema>>,
}

impl SchemaRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide table of built-in sites
    pub fn builtin() -> &'static SchemaRegistry {
        &BUILTIN
    }

    /// Built-in sites plus those of a TOML configuration file
    ///
    /// # Returns
    ///
    /// * `Ok((registry, client))` - Merged registry and the file's client settings
    /// * `Err(ScrapeError::Config)` - The file could not be read, parsed or validated
    pub fn from_config_file(path: &Path) -> Result<(Self, ClientConfig), ScrapeError> {
        let config = load_config(path)?;
        tracing::info!("Configuration adds {} site(s)", config.sites.len());

        let mut registry = Self::builtin().clone();
        registry.extend(config.sites);
        Ok((registry, config.client))
    }

    /// Registers a schema, replacing any previous one for the same key
    pub fn register(&mut self, schema: SiteSchema) -> Option<Arc<SiteSchema>> {
        let key = (schema.name.clone(), schema.language.clone());
        self.sites.insert(key, Arc::new(schema))
    }

    /// Adds every schema from the iterator
    pub fn extend<I: IntoIterator<Item = SiteSchema>>(&mut self, schemas: I) {
        for schema in schemas {
            if let Some(previous) = self.register(schema) {
                tracing::debug!(
                    "Replaced site schema {} ({})",
                    previous.name,
                    previous.language
                );
            }
        }
    }

    /// Resolves a schema, defaulting the language when omitted
    ///
    /// # Returns
    ///
    /// * `Ok(Arc<SiteSchema>)` - The registered schema
    /// * `Err(ScrapeError::UnknownSite)` - Nothing registered for the key
    pub fn get(&self, name: &str, language: Option<&str>) -> Result<Arc<SiteSchema>, ScrapeError> {
        let language = language.unwrap_or(DEFAULT_LANGUAGE);
        self.sites
            .get(&(name.to_string(), language.to_string()))
            .cloned()
            .ok_or_else(|| ScrapeError::UnknownSite {
                name: name.to_string(),
                language: language.to_string(),
            })
    }

    /// Returns all schemas sorted by name, then language
    pub fn sites(&self) -> Vec<Arc<SiteSchema>> {
        let mut sites: Vec<_> = self.sites.values().cloned().collect();
        sites.sort_by(|a, b| (&a.name, &a.language).cmp(&(&b.name, &b.language)));
        sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldMap, PageLayout};
    use crate::ConfigError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn schema(name: &str, language: &str) -> SiteSchema {
        SiteSchema {
            name: name.to_string(),
            language: language.to_string(),
            base_url: "https://example.fandom.com".to_string(),
            listing_url: "https://example.fandom.com/wiki/Category:Characters".to_string(),
            layout: PageLayout::Classic,
            data_source: FieldMap::new(),
        }
    }

    #[test]
    fn test_language_defaults_to_english() {
        let mut registry = SchemaRegistry::new();
        registry.register(schema("bleach", "en"));

        let found = registry.get("bleach", None).unwrap();
        assert_eq!(found.language, "en");
    }

    #[test]
    fn test_unknown_site() {
        let mut registry = SchemaRegistry::new();
        registry.register(schema("bleach", "en"));

        let err = registry.get("bleach", Some("de")).unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::UnknownSite { ref name, ref language } if name == "bleach" && language == "de"
        ));
        assert!(registry.get("nope", None).is_err());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = SchemaRegistry::new();
        assert!(registry.register(schema("bleach", "en")).is_none());
        assert!(registry.register(schema("bleach", "en")).is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_sites_sorted() {
        let mut registry = SchemaRegistry::new();
        registry.extend(vec![schema("b", "fr"), schema("a", "en"), schema("b", "en")]);

        let keys: Vec<_> = registry
            .sites()
            .iter()
            .map(|s| format!("{}:{}", s.name, s.language))
            .collect();
        assert_eq!(keys, vec!["a:en", "b:en", "b:fr"]);
    }

    #[test]
    fn test_builtin_sites_are_valid() {
        let registry = SchemaRegistry::builtin();
        assert!(!registry.is_empty());
        for site in registry.sites() {
            assert!(
                crate::config::validate_site(&site).is_ok(),
                "invalid builtin site {}",
                site.name
            );
        }
        assert!(registry.get("naruto", None).is_ok());
    }

    #[test]
    fn test_from_config_file_merges_sites() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"
[client]
request-timeout-secs = 5

[[site]]
name = "bleach"
base-url = "https://bleach.fandom.com"
listing-url = "https://bleach.fandom.com/wiki/Category:Characters"
"#,
        )
        .unwrap();

        let (registry, client) = SchemaRegistry::from_config_file(file.path()).unwrap();
        assert_eq!(client.request_timeout_secs, 5);
        assert_eq!(registry.len(), SchemaRegistry::builtin().len() + 1);
        assert!(registry.get("bleach", None).is_ok());
        assert!(registry.get("naruto", None).is_ok());
    }

    #[test]
    fn test_from_config_file_reports_config_error() {
        let result = SchemaRegistry::from_config_file(Path::new("/nonexistent/sites.toml"));
        assert!(matches!(
            result,
            Err(ScrapeError::Config(ConfigError::Io(_)))
        ));
    }
}
