use crate::config::Field;
use serde::Serialize;
use std::collections::BTreeMap;

/// Value extracted for one infobox field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Cleaned text of a general field
    Text(String),
    /// Image URLs, or base64 payloads when encoding was requested
    Images(Vec<String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Images(_) => None,
        }
    }

    pub fn as_images(&self) -> Option<&[String]> {
        match self {
            Self::Images(images) => Some(images),
            Self::Text(_) => None,
        }
    }
}

/// Extracted fields of one character page
pub type FieldData = BTreeMap<Field, FieldValue>;

/// One scraped character
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterRecord {
    /// Absolute URL of the character page
    pub url: String,

    /// Display name from the listing
    pub name: String,

    /// Page id embedded in the page metadata; only present when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Infobox data; absent unless recursive extraction was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<FieldData>,
}

impl CharacterRecord {
    /// Returns the text of a general field, if it was extracted
    pub fn text(&self, field: Field) -> Option<&str> {
        self.data.as_ref()?.get(&field)?.as_text()
    }

    /// Returns the extracted images, if any
    pub fn images(&self) -> Option<&[String]> {
        self.data.as_ref()?.get(&Field::Images)?.as_images()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(data: Option<FieldData>) -> CharacterRecord {
        CharacterRecord {
            url: "https://naruto.fandom.com/wiki/Itachi_Uchiha".to_string(),
            name: "Itachi Uchiha".to_string(),
            id: None,
            data,
        }
    }

    #[test]
    fn test_absent_data_is_not_serialized() {
        let json = serde_json::to_value(record(None)).unwrap();
        assert!(json.get("data").is_none());
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_empty_data_is_serialized() {
        let json = serde_json::to_value(record(Some(FieldData::new()))).unwrap();
        assert_eq!(json["data"], serde_json::json!({}));
    }

    #[test]
    fn test_field_keys() {
        let mut data = FieldData::new();
        data.insert(Field::VoiceActor, FieldValue::Text("Hideo Ishikawa".to_string()));
        data.insert(
            Field::Images,
            FieldValue::Images(vec!["https://img/a.png".to_string()]),
        );

        let record = record(Some(data));
        assert_eq!(record.text(Field::VoiceActor), Some("Hideo Ishikawa"));
        assert_eq!(record.images().map(<[String]>::len), Some(1));
        assert_eq!(record.text(Field::Images), None);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["data"]["voice_actor"], "Hideo Ishikawa");
        assert_eq!(json["data"]["images"][0], "https://img/a.png");
    }
}
