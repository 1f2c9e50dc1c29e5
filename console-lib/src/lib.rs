//! Admin console client library
//!
//! A Rust async client for the messaging/market platform admin REST API, plus
//! the headless remote data table every listing screen of the console is
//! built on.

pub mod api;
pub mod auth;
pub mod cache;
pub mod debounce;
pub mod disclosure;
pub mod error;
pub mod model;
pub mod rate_limit;
pub mod table;

mod client;

pub use client::*;
