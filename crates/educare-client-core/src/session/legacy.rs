//! Layouts written by earlier versions of the site.
//!
//! Newer layout first: `currentUser`, `currentRole` and `currentSessionId`,
//! then the older `educare_user` and `educare_session_id` pair. The record is
//! re-written in the current layout the next time a session is established.

use educare_shared::{
    const_config::session::legacy::{
        LEGACY_ALT_ROLE_KEY, LEGACY_ALT_TOKEN_KEY, LEGACY_ALT_USER_KEY, LEGACY_REMEMBER_KEY,
        LEGACY_TOKEN_KEY, LEGACY_USER_KEY,
    },
    token::SessionToken,
    uac::{Identity, Role},
};
use tracing::info;

use super::record::{SessionRecord, SessionRecordError};
use crate::storage::KeyValueStore;

pub(super) fn read_legacy<S: KeyValueStore>(
    storage: &S,
) -> Result<Option<SessionRecord>, SessionRecordError> {
    let role = get(storage, LEGACY_ALT_ROLE_KEY)?;
    if let Some(record) = read_layout(storage, LEGACY_ALT_USER_KEY, LEGACY_ALT_TOKEN_KEY, role)? {
        info!("found session in the current* layout");
        return Ok(Some(record));
    }
    let record = read_layout(storage, LEGACY_USER_KEY, LEGACY_TOKEN_KEY, None)?;
    if record.is_some() {
        info!("found session in the educare_* layout");
    }
    Ok(record)
}

fn read_layout<S: KeyValueStore>(
    storage: &S,
    user_key: &str,
    token_key: &str,
    role: Option<String>,
) -> Result<Option<SessionRecord>, SessionRecordError> {
    // A token on its own is written before anyone logs in, it is not a session
    let Some(user) = get(storage, user_key)? else {
        return Ok(None);
    };
    let token = get(storage, token_key)?.ok_or(SessionRecordError::Incomplete("token"))?;
    let identity: Identity = serde_json::from_str(&user)?;
    let role = match role {
        Some(role) => serde_json::from_value::<Role>(serde_json::Value::String(role))?,
        None => identity.role,
    };
    let remember = get(storage, LEGACY_REMEMBER_KEY)?.as_deref() == Some("true");
    SessionRecord::from_parts(identity, role, SessionToken::from(token), remember).map(Some)
}

fn get<S: KeyValueStore>(storage: &S, key: &str) -> Result<Option<String>, SessionRecordError> {
    storage
        .get_item(key)
        .map_err(SessionRecordError::Unreadable)
}
