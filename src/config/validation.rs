use crate::config::types::{ClientConfig, Config, SiteSchema};
use crate::{ConfigError, ConfigResult};
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_client_config(&config.client)?;

    let mut seen = HashSet::new();
    for site in &config.sites {
        validate_site(site)?;
        if !seen.insert((site.name.as_str(), site.language.as_str())) {
            return Err(ConfigError::Validation(format!(
                "Site '{}' ({}) is declared more than once",
                site.name, site.language
            )));
        }
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_client_config(config: &ClientConfig) -> ConfigResult<()> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates a single site schema
pub fn validate_site(site: &SiteSchema) -> ConfigResult<()> {
    if site.name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "Site name cannot be empty".to_string(),
        ));
    }

    if site.language.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "Site '{}' has an empty language code",
            site.name
        )));
    }

    validate_http_url(&site.base_url, "base-url")?;
    validate_http_url(&site.listing_url, "listing-url")?;

    Ok(())
}

fn validate_http_url(raw: &str, key: &str) -> ConfigResult<()> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", key, raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            key, raw
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldMap, PageLayout};

    fn site(name: &str, language: &str) -> SiteSchema {
        SiteSchema {
            name: name.to_string(),
            language: language.to_string(),
            base_url: "https://naruto.fandom.com".to_string(),
            listing_url: "https://naruto.fandom.com/wiki/Category:Characters".to_string(),
            layout: PageLayout::Classic,
            data_source: FieldMap::new(),
        }
    }

    #[test]
    fn test_valid_site() {
        assert!(validate_site(&site("naruto", "en")).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(validate_site(&site(" ", "en")).is_err());
        assert!(validate_site(&site("naruto", "")).is_err());
    }

    #[test]
    fn test_non_http_url_rejected() {
        let mut schema = site("naruto", "en");
        schema.listing_url = "ftp://naruto.fandom.com/list".to_string();
        assert!(matches!(
            validate_site(&schema),
            Err(ConfigError::InvalidUrl(_))
        ));

        schema.listing_url = "not a url".to_string();
        assert!(validate_site(&schema).is_err());
    }

    #[test]
    fn test_duplicate_sites_rejected() {
        let config = Config {
            client: ClientConfig::default(),
            sites: vec![site("naruto", "en"), site("naruto", "en")],
        };
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));

        let config = Config {
            client: ClientConfig::default(),
            sites: vec![site("naruto", "en"), site("naruto", "fr")],
        };
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = Config {
            client: ClientConfig {
                request_timeout_secs: 0,
                ..ClientConfig::default()
            },
            sites: vec![],
        };
        assert!(validate(&config).is_err());
    }
}
