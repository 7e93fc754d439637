//! # Zoo Backend
//!
//! Record keeping for zoos: animals, categories, enclosures and zoos, plus the
//! daily routines run on them (sunrise, sunset, feeding time, auto-assigning
//! animals to enclosures and checking enclosure constraints).
//!
//! ## Architecture
//!
//! - [`models`]: records, ids and enumerations
//! - [`db`]: repository traits, local and Postgres implementations, factory
//! - [`services`]: validation, orchestration and the action logic
//! - [`config`]: server address and delete policies
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
