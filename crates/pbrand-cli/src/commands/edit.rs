//! Field edit commands.

use anyhow::{anyhow, Result};
use clap::Subcommand;
use pbrand_core::editor::Resolution;
use pbrand_core::PackageField;

use super::Context;
use crate::output;

#[derive(Subcommand)]
pub enum EditCommands {
    /// Replace the active brand name
    BrandName {
        /// Project ID
        id: String,
        /// New brand name
        value: String,
    },

    /// Replace the English text of the active slogan
    Slogan {
        /// Project ID
        id: String,
        /// New slogan text
        value: String,
    },

    /// Replace the content of the active leaflet section
    Leaflet {
        /// Project ID
        id: String,
        /// New section content
        value: String,
    },
}

impl EditCommands {
    fn into_parts(self) -> (PackageField, String, String) {
        match self {
            Self::BrandName { id, value } => (PackageField::BrandName, id, value),
            Self::Slogan { id, value } => (PackageField::Slogan, id, value),
            Self::Leaflet { id, value } => (PackageField::Leaflet, id, value),
        }
    }
}

pub async fn execute(cmd: EditCommands, ctx: &Context) -> Result<()> {
    let (field, id, value) = cmd.into_parts();
    let mut store = ctx.load(&id).await?;

    store.set_working_value(field, value);
    if !store.editor(field).is_dirty() {
        println!("{} is unchanged.", field.label());
        return Ok(());
    }

    let spinner = output::spinner(&format!("Saving {}...", field.label().to_lowercase()));
    let result = store.save(field).await;
    spinner.finish_and_clear();

    match result {
        Ok(Resolution::Saved) => {
            output::success(store.feedback().unwrap_or("Saved."));
            Ok(())
        }
        // Superseded by a newer save.
        Ok(_) => Ok(()),
        Err(e) => {
            output::failure(&e.user_message());
            Err(anyhow!("{} was not saved", field.label()))
        }
    }
}
