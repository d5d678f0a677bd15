//! Command-line interface for TDS.
//!
//! Arguments are parsed with clap's derive macros and turned into the
//! [`ParameterBag`](crate::params::ParameterBag) an
//! [`Application`](crate::app::Application) runs on.

pub mod args;

pub use args::Cli;
