//! Oakline storefront library.
//!
//! Exposes the storefront internals for the CLI and the integration-test
//! crate; the binary in `main.rs` wires them to a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cms;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod render;
pub mod routes;
pub mod services;
pub mod state;
