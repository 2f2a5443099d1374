//! Core types and content logic for the Folio studio site.
//!
//! This crate is deliberately free of HTTP and database dependencies. It owns
//! the site document model, the content store and its storage seam, the
//! startup merge of remote gallery entries, and the admin editor session.
//! Backends and transports live in sibling crates.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod defaults;
pub mod document;
pub mod editor;
pub mod error;
pub mod filter;
pub mod inquiry;
pub mod language;
pub mod loader;
pub mod storage;
pub mod store;

pub use error::{Error, Result};
