use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::IndexError;

/// Content categories the ingestion pipeline hands to `index_content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Note,
    Flashcard,
    Quiz,
    Slide,
}

impl ContentType {
    /// Parse the `content_type` string from the ingestion API.
    pub fn parse(name: &str) -> Result<Self, IndexError> {
        match name.to_ascii_lowercase().as_str() {
            "note" | "notes" => Ok(Self::Note),
            "flashcard" | "flashcards" => Ok(Self::Flashcard),
            "quiz" | "quizzes" => Ok(Self::Quiz),
            "slide" | "slides" => Ok(Self::Slide),
            _ => Err(IndexError::UnknownContentType {
                name: name.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Flashcard => "flashcard",
            Self::Quiz => "quiz",
            Self::Slide => "slide",
        }
    }
}

/// Raw ingestion payload. Each content type carries different source fields
/// (a flashcard has `front`/`back`, a quiz has `question`/`answer`/...);
/// normalization into a [`Document`] flattens them into one body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// A normalized, indexable unit of study material.
///
/// Immutable once indexed; re-indexing replaces documents wholesale,
/// never mutates them in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    /// `type`, `owner`, `title`, `created_at`, optionally `concept`.
    pub metadata: BTreeMap<String, String>,
}

impl Document {
    /// Normalize a raw item into a document.
    ///
    /// Field mapping per content type:
    /// note → `title` + `text`, flashcard → `front` + `back`,
    /// quiz → `question` + `answer` + `explanation`, slide → `title` + `bullets`.
    pub fn from_item(content_type: ContentType, item: &ContentItem) -> Result<Self, IndexError> {
        if item.id.trim().is_empty() {
            return Err(IndexError::EmptyDocumentId);
        }

        let field_names: &[&str] = match content_type {
            ContentType::Note => &["title", "text"],
            ContentType::Flashcard => &["front", "back"],
            ContentType::Quiz => &["question", "answer", "explanation"],
            ContentType::Slide => &["title", "bullets"],
        };
        let content = field_names
            .iter()
            .filter_map(|name| item.fields.get(*name))
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let mut metadata = item.metadata.clone();
        metadata.insert("type".to_string(), content_type.as_str().to_string());
        metadata
            .entry("created_at".to_string())
            .or_insert_with(|| Utc::now().to_rfc3339());
        if let Some(title) = item.fields.get("title") {
            metadata
                .entry("title".to_string())
                .or_insert_with(|| title.clone());
        }

        Ok(Self {
            id: item.id.clone(),
            content,
            metadata,
        })
    }
}
