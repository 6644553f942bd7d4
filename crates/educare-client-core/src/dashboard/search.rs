//! Client side filters over rows a dashboard already fetched. A blank term or
//! `None` keeps everything.

use educare_shared::{
    activity::{ActivityCategory, ActivityEntry, ActivityKind},
    content::{ContentItem, ContentKind},
    uac::Identity,
};

/// Case insensitive match on name, email and role
pub fn filter_users<'a>(users: &'a [Identity], term: &str) -> Vec<&'a Identity> {
    let term = term.trim().to_lowercase();
    users
        .iter()
        .filter(|user| {
            term.is_empty()
                || user
                    .full_name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&term))
                || user.email.as_ref().to_lowercase().contains(&term)
                || user.role.as_ref().contains(&term)
        })
        .collect()
}

/// Kind must match first, then the term is looked for in title and
/// description
pub fn filter_content<'a>(
    items: &'a [ContentItem],
    term: &str,
    kind: Option<ContentKind>,
) -> Vec<&'a ContentItem> {
    let term = term.trim().to_lowercase();
    items
        .iter()
        .filter(|item| kind.is_none_or(|kind| item.kind == kind))
        .filter(|item| {
            term.is_empty()
                || item.title.to_lowercase().contains(&term)
                || item
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&term))
        })
        .collect()
}

pub fn filter_activities<'a>(
    entries: &'a [ActivityEntry],
    kind: Option<ActivityKind>,
) -> Vec<&'a ActivityEntry> {
    entries
        .iter()
        .filter(|entry| kind.is_none_or(|kind| entry.action == kind))
        .collect()
}

pub fn filter_by_category<'a>(
    entries: &'a [ActivityEntry],
    category: Option<ActivityCategory>,
) -> Vec<&'a ActivityEntry> {
    entries
        .iter()
        .filter(|entry| category.is_none_or(|category| entry.category() == category))
        .collect()
}
