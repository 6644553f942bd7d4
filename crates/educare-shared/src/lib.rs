//! Code shared between the Educare clients and the records they exchange with
//! the data service

#![warn(unused_crate_dependencies)]

pub mod activity;
pub mod const_config;
pub mod content;
pub mod errors;
pub mod id;
mod macros;
pub mod page;
pub mod random;
pub mod req_args;
pub mod token;
pub mod uac;

pub use random::{random_string, random_string_def_len};

#[cfg(not(target_arch = "wasm32"))]
pub mod telemetry;
