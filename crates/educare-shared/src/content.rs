//! Rows of the `content` table (uploaded course material and notices)

use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_default_from_null;

use crate::id::DbId;

#[derive(
    Debug,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContentKind {
    Document,
    Video,
    Image,
    Audio,
    Announcement,
    #[default]
    #[serde(other)]
    Other,
}

/// Who may see a content item. Rows without a value are public.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    #[default]
    Public,
    Students,
    Admin,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub id: DbId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "deserialize_default_from_null")]
    pub kind: ContentKind,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub access_level: AccessLevel,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
