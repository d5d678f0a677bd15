//! TDS - deployment tool bootstrap and command dispatch.
//!
//! An invocation checks the operator's options, resolves their access level
//! from their OS groups, loads configuration, opens one database session and
//! hands the command to its handler.
//!
//! # Modules
//!
//! - [`app`] - The per-invocation orchestrator
//! - [`auth`] - Access levels, the operator's identity, and access checks
//! - [`bootstrap`] - Opening the database session
//! - [`cli`] - Command-line interface and argument parsing
//! - [`commands`] - Handler registry and dispatch
//! - [`config`] - Memoized configuration and credential loading
//! - [`db`] - Database session and backends
//! - [`error`] - Error types and result aliases
//! - [`params`] - The per-invocation parameter bag
//! - [`render`] - Turning handler results into output
//! - [`ui`] - Prompts, spinners, and terminal output
//! - [`validate`] - Option checks
//!
//! # Example
//!
//! ```
//! use tds::params::ParameterBag;
//! use tds::validate::validate;
//!
//! let mut params = ParameterBag::new();
//! params.insert("hosts", vec!["web01"]).unwrap();
//! assert!(validate(&mut params).unwrap());
//! assert_eq!(params.get_bool("explicit"), Some(true));
//! ```
//!
//! For a full invocation against a database, see the integration tests.

pub mod app;
pub mod auth;
pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod params;
pub mod render;
pub mod ui;
pub mod validate;

pub use error::{ErrorKind, Result, TdsError};
