//! The one place that knows whether someone is logged in.
//!
//! [`SessionStore`] owns the persisted record, [`SessionManager`] is the
//! per-page view of it that pages and flows consult.

mod legacy;
mod manager;
mod record;
mod store;

pub use manager::SessionManager;
pub use record::SessionRecord;
pub use store::SessionStore;
