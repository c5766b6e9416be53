//! CLI command definitions and handlers.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use pbrand_client::{ClientConfig, HttpBrandApi};
use pbrand_core::{BrandResult, LinkOpener, ProjectStore, Session, UserId};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::output;

pub mod compliance;
pub mod edit;
pub mod export;
pub mod project;

/// PharmaBrand - brand package workspace for product launches
#[derive(Parser)]
#[command(name = "pbrand")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend base URL (overrides config file and PBRAND_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to a TOML config file (defaults to ~/.pbrand/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Signed-in user ID
    #[arg(short, long, global = true, env = "PBRAND_USER")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create, list and inspect projects
    #[command(subcommand)]
    Project(project::ProjectCommands),

    /// Edit and save a brand-package field
    #[command(subcommand)]
    Edit(edit::EditCommands),

    /// Request a compliance check
    Compliance(compliance::ComplianceArgs),

    /// Export the leaflet PDF or a logo concept
    #[command(subcommand)]
    Export(export::ExportCommands),
}

/// Backend access shared by all commands.
pub struct Context {
    pub api: Arc<HttpBrandApi>,
    pub session: Option<Session>,
}

impl Context {
    fn build(cli: &Cli) -> Result<Self> {
        let mut config = ClientConfig::load(cli.config.as_deref())?;
        if let Some(url) = &cli.api_url {
            config = config.with_base_url(url.clone());
        }
        debug!(base_url = %config.base_url, "Using backend");

        let session = cli.user.as_ref().map(|user| {
            let session = Session::new(UserId::new(user.clone()));
            match &config.access_token {
                Some(token) => session.with_token(token.clone()),
                None => session,
            }
        });

        let mut api = HttpBrandApi::new(&config)?;
        if let Some(session) = &session {
            api = api.with_session(session);
        }

        Ok(Self {
            api: Arc::new(api),
            session,
        })
    }

    /// A fresh project store bound to this session.
    pub fn store(&self) -> ProjectStore {
        let store = ProjectStore::new(self.api.clone());
        match &self.session {
            Some(session) => store.with_session(session.clone()),
            None => store,
        }
    }

    /// Load a project into a fresh store, reporting failure on the terminal.
    pub async fn load(&self, id: &str) -> Result<ProjectStore> {
        let mut store = self.store();
        let spinner = output::spinner("Loading project...");
        let loaded = store.load(id).await;
        spinner.finish_and_clear();
        if loaded.is_err() {
            output::failure(store.error().unwrap_or("Failed to fetch project."));
            return Err(anyhow!("could not load project {id}"));
        }
        Ok(store)
    }
}

/// Prints links instead of launching a viewer.
pub struct TerminalOpener;

impl LinkOpener for TerminalOpener {
    fn open(&self, url: &str) -> BrandResult<()> {
        println!("{url}");
        Ok(())
    }
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let ctx = Context::build(&self)?;

        match self.command {
            Commands::Project(cmd) => project::execute(cmd, &ctx).await,
            Commands::Edit(cmd) => edit::execute(cmd, &ctx).await,
            Commands::Compliance(args) => compliance::execute(args, &ctx).await,
            Commands::Export(cmd) => export::execute(cmd, &ctx).await,
        }
    }
}
