use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::normalize;

/// Format used for `learned_at` in knowledge files
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Where an entry lives for the current process. Never serialized: the
/// `source` field is free-text metadata and does not decide where an entry
/// is written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    /// Learned or replaced during this process
    #[default]
    Session,
    /// Loaded from the knowledge file at this position in the configured list
    File(usize),
}

impl Origin {
    /// Entries the primary (first) knowledge file is responsible for
    pub fn is_primary(&self) -> bool {
        matches!(self, Origin::Session | Origin::File(0))
    }
}

/// A single learned question and its answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaEntry {
    #[serde(rename = "q")]
    pub question: String,

    #[serde(rename = "a")]
    pub answer: String,

    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp")]
    pub learned_at: Option<NaiveDateTime>,

    /// Knowledge file this entry belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(skip)]
    pub origin: Origin,
}

impl QaEntry {
    /// Entry learned now from `source`
    pub fn learned(question: impl Into<String>, answer: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            learned_at: Some(Local::now().naive_local()),
            source: Some(source.into()),
            origin: Origin::Session,
        }
    }

    /// Entry without provenance, as found in hand-written knowledge files
    pub fn bare(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            learned_at: None,
            source: None,
            origin: Origin::Session,
        }
    }

    /// Mark the entry as read from the knowledge file at `index`
    pub fn loaded_from(mut self, index: usize) -> Self {
        self.origin = Origin::File(index);
        self
    }

    pub fn normalized_question(&self) -> String {
        normalize(&self.question)
    }

    pub fn is_from(&self, source: &str) -> bool {
        self.source.as_deref() == Some(source)
    }
}

mod timestamp {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&ts.format(TIMESTAMP_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error> {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };

        if let Ok(ts) = NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT) {
            return Ok(Some(ts));
        }

        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| Some(ts.naive_local()))
            .map_err(|_| de::Error::custom(format!("invalid learned_at timestamp: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_deserialize_full_entry() {
        let entry: QaEntry = serde_json::from_str(
            r#"{"q": "What is your name", "a": "Lux", "learned_at": "2024-03-01 09:30:00", "source": "knowledge_base.json"}"#,
        )
        .unwrap();

        assert_eq!(entry.question, "What is your name");
        assert_eq!(entry.answer, "Lux");
        assert_eq!(
            entry.learned_at,
            Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(9, 30, 0).unwrap())
        );
        assert!(entry.is_from("knowledge_base.json"));
        assert_eq!(entry.normalized_question(), "what is your name");
    }

    #[test]
    fn test_deserialize_bare_entry() {
        let entry: QaEntry = serde_json::from_str(r#"{"q": "ping", "a": "pong"}"#).unwrap();
        assert_eq!(entry, QaEntry::bare("ping", "pong"));

        let json = serde_json::to_string(&entry.clone().loaded_from(3)).unwrap();
        assert_eq!(json, r#"{"q":"ping","a":"pong"}"#, "origin is never written");
    }

    #[test]
    fn test_origin_primary() {
        assert!(Origin::Session.is_primary());
        assert!(Origin::File(0).is_primary());
        assert!(!Origin::File(2).is_primary());
        assert_eq!(QaEntry::bare("q", "a").loaded_from(2).origin, Origin::File(2));
    }

    #[test]
    fn test_timestamp_format_is_kept() {
        let mut entry = QaEntry::learned("q", "a", "kb.json");
        entry.learned_at = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap().and_hms_opt(23, 59, 1);

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["learned_at"], "2025-12-31 23:59:01");
        assert_eq!(value["source"], "kb.json");
    }

    #[test]
    fn test_rfc3339_timestamp_accepted() {
        let entry: QaEntry =
            serde_json::from_str(r#"{"q": "q", "a": "a", "learned_at": "2024-01-02T03:04:05+00:00"}"#).unwrap();
        assert!(entry.learned_at.is_some());

        let bad = serde_json::from_str::<QaEntry>(r#"{"q": "q", "a": "a", "learned_at": "yesterday"}"#);
        assert!(bad.is_err());
    }
}
