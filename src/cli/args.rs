//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use serde_yaml::Value;
use std::path::PathBuf;

use crate::params::ParameterBag;
use crate::render::OutputFormat;
use crate::ui::OutputMode;

/// TDS - deployment tool for operators.
#[derive(Debug, Parser)]
#[command(name = "tds")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding deploy.yml and dbaccess.<level>.yml
    #[arg(long, env = "TDS_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Connect to the database as this account (prompts for its password)
    #[arg(long)]
    pub dbuser: Option<String>,

    /// Target these hosts (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub hosts: Vec<String>,

    /// Target these application types (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub apptypes: Vec<String>,

    /// Target every application type
    #[arg(long)]
    pub all_apptypes: bool,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Never prompt; answers come from TDS_PROMPT_<KEY> variables
    #[arg(long)]
    pub non_interactive: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Command to run, e.g. `repository`
    pub command: String,

    /// Subcommand to run, e.g. `list`
    pub subcommand: String,

    /// Projects the command applies to
    pub projects: Vec<String>,
}

impl Cli {
    /// Output verbosity selected by `--verbose` / `--quiet`.
    pub fn output_mode(&self) -> OutputMode {
        if self.quiet {
            OutputMode::Quiet
        } else if self.verbose {
            OutputMode::Verbose
        } else {
            OutputMode::Normal
        }
    }

    /// The invocation parameters these arguments describe.
    pub fn to_params(&self) -> ParameterBag {
        let mut params = ParameterBag::new();
        params.replace("command_name", self.command.as_str());
        params.replace("subcommand_name", self.subcommand.as_str());
        params.replace("hosts", strings(&self.hosts));
        params.replace("apptypes", strings(&self.apptypes));
        params.replace("all_apptypes", self.all_apptypes);
        params.replace("projects", strings(&self.projects));
        if let Some(dbuser) = &self.dbuser {
            params.replace("dbuser", dbuser.as_str());
        }
        params
    }
}

fn strings(items: &[String]) -> Value {
    Value::Sequence(items.iter().map(|s| Value::from(s.as_str())).collect())
}
