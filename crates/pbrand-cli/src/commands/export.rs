//! Export commands.

use anyhow::{anyhow, Result};
use clap::Subcommand;

use super::{Context, TerminalOpener};
use crate::output;

#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export the leaflet as PDF and print its link
    Pdf {
        /// Project ID
        id: String,
    },

    /// Print the link of a logo concept
    Logo {
        /// Project ID
        id: String,
        /// Logo concept index, starting at 0
        index: usize,
    },
}

pub async fn execute(cmd: ExportCommands, ctx: &Context) -> Result<()> {
    let (id, logo) = match cmd {
        ExportCommands::Pdf { id } => (id, None),
        ExportCommands::Logo { id, index } => (id, Some(index)),
    };
    let mut store = ctx.load(&id).await?;

    let result = match logo {
        None => {
            let spinner = output::spinner("Exporting leaflet...");
            let result = store.export_leaflet(&TerminalOpener).await;
            spinner.finish_and_clear();
            result
        }
        Some(index) => store.export_logo(index, &TerminalOpener),
    };

    result.map(|_| ()).map_err(|e| {
        output::failure(store.export_error().unwrap_or(&e.user_message()));
        anyhow!("export failed")
    })
}
