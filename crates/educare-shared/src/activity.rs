//! Entries of the `activity_logs` table

use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_default_from_null;

use crate::{id::DbId, token::SessionToken};

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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActivityKind {
    Login,
    Logout,
    Registration,
    Upload,
    CourseEnroll,
    LessonComplete,
    ContentDownload,
    QuizAttempt,
    ProfileUpdate,
    CourseProgress,
    /// An admin created an account from the admin dashboard
    UserCreation,
    #[default]
    #[serde(other)]
    Other,
}

/// Tabs of the activity list on the user dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum ActivityCategory {
    Login,
    Course,
    Progress,
    Content,
    Profile,
    General,
}

impl ActivityKind {
    pub fn category(&self) -> ActivityCategory {
        match self {
            ActivityKind::Login | ActivityKind::Logout | ActivityKind::Registration => {
                ActivityCategory::Login
            }
            ActivityKind::CourseEnroll => ActivityCategory::Course,
            ActivityKind::LessonComplete
            | ActivityKind::QuizAttempt
            | ActivityKind::CourseProgress => ActivityCategory::Progress,
            ActivityKind::Upload | ActivityKind::ContentDownload => ActivityCategory::Content,
            ActivityKind::ProfileUpdate => ActivityCategory::Profile,
            ActivityKind::UserCreation | ActivityKind::Other => ActivityCategory::General,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    pub user_id: Option<DbId>,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub action: ActivityKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
}

impl ActivityEntry {
    pub fn category(&self) -> ActivityCategory {
        self.action.category()
    }
}

/// Row appended to the audit trail
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct NewActivityEntry {
    pub user_id: DbId,
    pub action: ActivityKind,
    pub description: String,
    pub session_id: SessionToken,
    pub timestamp: String,
}
