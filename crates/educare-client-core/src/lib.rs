//! Session and authentication core of the Educare site clients.
//!
//! NB: The assumption is made that the async runtime has already been started
//! before any functions that talk to the data service are called. Everything
//! here runs on the single UI event loop of a page, shared state is therefore
//! kept in `Rc`/`RefCell` and never borrowed across an `.await`.

#![warn(unused_crate_dependencies)]

#[cfg(target_arch = "wasm32")]
mod suppress_wasm_warnings {
    // Needed because we need to enable js feature on this crate
    use getrandom as _;
}


mod accounts;
mod audit;
pub mod auth;
mod busy;
mod client;
pub mod dashboard;
pub mod gateway;
pub mod session;
pub mod settings;
pub mod storage;
pub mod ui;

pub use auth::{AuthFlow, AuthState};
pub use client::GatewayClient;
pub use gateway::{DataGateway, Filter, Table};
pub use session::{SessionManager, SessionRecord, SessionStore};
pub use settings::{ClientSettings, GatewaySettings, SessionSettings};
pub use storage::{KeyValueStore, MemoryStorage};
pub use ui::{NavState, NavigationSurface, Notification, NotificationKind, UiHost, UserAction};

#[cfg(not(target_arch = "wasm32"))]
pub use settings::get_configuration;
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use storage::BrowserStorage;
