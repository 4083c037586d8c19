//! Command-line interface for todoview
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::source::{FileTaskSource, HttpTaskSource, TaskSource};

mod list;
mod owners;

/// todoview - remote todo list viewer
///
/// Fetches the todo collection once, then lets you search, filter by
/// completion and owner, page through results and mark favorites.
#[derive(Parser, Debug)]
#[command(name = "todoview")]
#[command(author, version, long_about = None)]
#[command(about = "todoview - remote todo list viewer")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (defaults to ./.todoview.toml, then the user config dir)
    #[arg(long, global = true, env = "TODOVIEW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Collection endpoint to fetch
    #[arg(long, global = true, env = "TODOVIEW_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Read the collection from a local JSON file instead of the endpoint
    #[arg(long, global = true)]
    pub input: Option<PathBuf>,

    /// Tasks per page
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive list view (default)
    View,

    /// Print one page of the filtered list
    List {
        /// Match titles (case-insensitive) or task numbers
        #[arg(short, long, default_value = "")]
        search: String,

        /// Completion filter: all, completed, not-completed
        #[arg(long, default_value = "all")]
        status: String,

        /// Only tasks owned by this user id
        #[arg(long)]
        owner: Option<u64>,

        /// Page to print (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// List the distinct owner ids in the collection
    Owners,
}

/// Resolved configuration plus the data source for one view session.
pub struct Session {
    pub config: Config,
    pub source: Box<dyn TaskSource + Send>,
}

impl Cli {
    /// Subcommand name used to label output envelopes.
    pub fn command_name(&self) -> &'static str {
        match self.command {
            None | Some(Commands::View) => "view",
            Some(Commands::List { .. }) => "list",
            Some(Commands::Owners) => "owners",
        }
    }

    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let session = self.session()?;
        match self.command.unwrap_or(Commands::View) {
            Commands::View => crate::ui::list_view::run(session),
            Commands::List {
                search,
                status,
                owner,
                page,
            } => list::run(
                session,
                list::ListOptions {
                    search,
                    status,
                    owner,
                    page,
                    json: self.json,
                    quiet: self.quiet,
                },
            ),
            Commands::Owners => owners::run(
                session,
                owners::OwnersOptions {
                    json: self.json,
                    quiet: self.quiet,
                },
            ),
        }
    }

    fn session(&self) -> Result<Session> {
        let cwd = std::env::current_dir()?;
        let config = Config::discover(self.config.as_deref(), &cwd)?
            .with_overrides(self.endpoint.clone(), self.page_size)?;
        let source: Box<dyn TaskSource + Send> = match self.input.as_ref() {
            Some(path) => Box::new(FileTaskSource::new(path)),
            None => Box::new(HttpTaskSource::new(config.endpoint.clone())),
        };
        Ok(Session { config, source })
    }
}
