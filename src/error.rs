//! Error types for TDS operations.
//!
//! This module defines [`TdsError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Every failure aborts the invocation and surfaces to `main`
//! - [`TdsError::kind`] classifies errors so the caller can pick an exit code
//! - Errors raised by command handlers are never translated on the way up
//! - Use `anyhow::Error` (via `TdsError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

use crate::auth::AccessLevel;

/// Core error type for TDS operations.
#[derive(Debug, Error)]
pub enum TdsError {
    /// The operator has no access level at all.
    #[error(
        "Your account ({account}) is not allowed to run this application.\n\
         Please refer to your manager for assistance."
    )]
    AccessDenied { account: String },

    /// The operator's access level ranks below what the operation requires.
    #[error(
        "Your account ({account}) does not have the required access level \
         ({required}) for this operation; current level is {}",
        level_name(.level)
    )]
    InsufficientAccess {
        account: String,
        level: Option<AccessLevel>,
        required: AccessLevel,
    },

    /// More than one targeting option was given.
    #[error(
        "Only one of the {} options may be used at a given time",
        format_options(.options)
    )]
    ExclusiveOptions { options: Vec<String> },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// A configuration file exists but could not be read.
    #[error("Failed to read config at {}: {source}", .path.display())]
    ConfigReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A required configuration key is absent.
    #[error("Missing configuration key '{key}' in {path}")]
    MissingConfigKey { key: String, path: PathBuf },

    /// A parameter set by an earlier stage would be silently overwritten.
    #[error("Parameter '{key}' is already set")]
    ParameterConflict { key: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Neither an override nor a capability handles the command.
    #[error("Unknown command: {command} {subcommand}")]
    UnresolvedCommand { command: String, subcommand: String },

    /// The database session was already initialized for this process.
    #[error("Database session is already open")]
    SessionAlreadyOpen,

    /// Database driver error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Broad error classes visible at the process boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Resolved access level is absent or insufficient.
    Access,
    /// Invalid options, or configuration/credentials failed to load.
    Configuration,
    /// No handler exists for the command identifier.
    UnresolvedCommand,
    /// Anything raised while running a handler or talking to the database.
    Handler,
}

impl ErrorKind {
    /// Process exit code for this class of failure.
    ///
    /// Code 2 is left to clap for command-line usage errors.
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Handler => 1,
            Self::Configuration => 3,
            Self::Access => 4,
            Self::UnresolvedCommand => 5,
        }
    }
}

impl TdsError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AccessDenied { .. } | Self::InsufficientAccess { .. } => ErrorKind::Access,
            Self::ExclusiveOptions { .. }
            | Self::ConfigNotFound { .. }
            | Self::ConfigReadError { .. }
            | Self::ConfigParseError { .. }
            | Self::MissingConfigKey { .. }
            | Self::ParameterConflict { .. }
            | Self::ConfigValidationError { .. } => ErrorKind::Configuration,
            Self::UnresolvedCommand { .. } => ErrorKind::UnresolvedCommand,
            Self::SessionAlreadyOpen | Self::Database(_) | Self::Io(_) | Self::Other(_) => {
                ErrorKind::Handler
            }
        }
    }
}

fn level_name(level: &Option<AccessLevel>) -> String {
    level.map_or_else(|| "none".to_string(), |l| l.to_string())
}

fn format_options(options: &[String]) -> String {
    let quoted: Vec<String> = options.iter().map(|o| format!("\"{}\"", o)).collect();
    match quoted.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
        Some((last, _)) => last.clone(),
        None => String::new(),
    }
}

/// Result type alias for TDS operations.
pub type Result<T> = std::result::Result<T, TdsError>;
