use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Logical infobox fields a site can map to a locator
///
/// The set is closed: a site configuration naming any other key fails to
/// parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Kanji,
    Romaji,
    Status,
    Species,
    Gender,
    Age,
    Birthday,
    Height,
    Weight,
    Affiliation,
    Occupation,
    Relatives,
    Episode,
    Manga,
    VoiceActor,
    Images,
}

/// Extraction strategy selected for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Text of the infobox row carrying `data-source=<locator>`
    Text,
    /// `src` of every element whose class matches the locator
    ImageList,
}

impl Field {
    /// Returns the extraction strategy for this field
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Images => FieldKind::ImageList,
            _ => FieldKind::Text,
        }
    }

    /// Key used for this field in output records
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Kanji => "kanji",
            Self::Romaji => "romaji",
            Self::Status => "status",
            Self::Species => "species",
            Self::Gender => "gender",
            Self::Age => "age",
            Self::Birthday => "birthday",
            Self::Height => "height",
            Self::Weight => "weight",
            Self::Affiliation => "affiliation",
            Self::Occupation => "occupation",
            Self::Relatives => "relatives",
            Self::Episode => "episode",
            Self::Manga => "manga",
            Self::VoiceActor => "voice_actor",
            Self::Images => "images",
        }
    }

    /// Parses an output key back into a field
    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().into_iter().find(|field| field.as_str() == key)
    }

    /// Returns all fields
    pub fn all() -> Vec<Self> {
        vec![
            Self::Name,
            Self::Kanji,
            Self::Romaji,
            Self::Status,
            Self::Species,
            Self::Gender,
            Self::Age,
            Self::Birthday,
            Self::Height,
            Self::Weight,
            Self::Affiliation,
            Self::Occupation,
            Self::Relatives,
            Self::Episode,
            Self::Manga,
            Self::VoiceActor,
            Self::Images,
        ]
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-name-to-locator mapping ("data source" map)
///
/// An empty locator means the field is skipped for that site.
pub type FieldMap = BTreeMap<Field, String>;

/// Page template a site is built on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PageLayout {
    #[default]
    #[serde(rename = "classic")]
    Classic,
    #[serde(rename = "table-1")]
    Table1,
    #[serde(rename = "table-2")]
    Table2,
}

impl PageLayout {
    /// Returns true if scraping is implemented for this layout
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Classic)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Table1 => "table-1",
            Self::Table2 => "table-2",
        }
    }
}

impl fmt::Display for PageLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-site scraping schema
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SiteSchema {
    /// Fiction identifier (e.g. "naruto")
    pub name: String,

    /// Language code of the wiki (e.g. "en")
    #[serde(default = "default_language")]
    pub language: String,

    /// Root of the wiki, used to build character page URLs
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// First page of the character index
    #[serde(rename = "listing-url")]
    pub listing_url: String,

    /// Page template
    #[serde(default)]
    pub layout: PageLayout,

    /// Locators for infobox fields
    #[serde(rename = "data-source", default, deserialize_with = "deserialize_field_map")]
    pub data_source: FieldMap,
}

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Upper bound for a whole request, in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Upper bound for establishing a connection, in seconds
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("fandom-harvest/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,

    /// Additional site schemas
    #[serde(default, rename = "site")]
    pub sites: Vec<SiteSchema>,
}

pub(crate) fn default_language() -> String {
    super::DEFAULT_LANGUAGE.to_string()
}

fn deserialize_field_map<'de, D>(deserializer: D) -> Result<FieldMap, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, locator)| {
            Field::from_key(&key)
                .map(|field| (field, locator))
                .ok_or_else(|| serde::de::Error::custom(format!("unknown field '{}'", key)))
        })
        .collect()
}
