//! Project commands.

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use pbrand_core::project::{CreateProjectForm, ProjectCreationFlow};
use pbrand_core::BrandApi;

use super::Context;
use crate::output;

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a new project
    New(NewProjectArgs),

    /// List projects of the signed-in user
    List {
        /// List every project regardless of owner
        #[arg(long)]
        all: bool,
    },

    /// Show a project with its insights and brand package
    Show {
        /// Project ID
        id: String,
    },
}

#[derive(Args)]
pub struct NewProjectArgs {
    /// Product name
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Molecule(s), e.g. "Empagliflozin 10mg + Linagliptin 5mg"
    #[arg(short, long, default_value = "")]
    pub molecule: String,

    /// Therapeutic area, e.g. "Type 2 Diabetes"
    #[arg(short, long, default_value = "")]
    pub area: String,

    /// Key differentiating benefits
    #[arg(short, long, default_value = "")]
    pub benefits: String,

    /// Describe the project in natural language instead
    #[arg(short, long, default_value = "")]
    pub prompt: String,
}

impl From<NewProjectArgs> for CreateProjectForm {
    fn from(args: NewProjectArgs) -> Self {
        Self {
            project_name: args.name,
            molecule_names: args.molecule,
            therapeutic_area: args.area,
            key_differentiating_benefits: args.benefits,
            natural_language_prompt: args.prompt,
        }
    }
}

pub async fn execute(cmd: ProjectCommands, ctx: &Context) -> Result<()> {
    match cmd {
        ProjectCommands::New(args) => {
            let mut flow = ProjectCreationFlow::new(args.into());
            let spinner = output::spinner("Creating project...");
            let result = flow
                .submit(&*ctx.api, |project| {
                    spinner.finish_and_clear();
                    output::success(&format!(
                        "Created project: {} ({})",
                        project.display_title().cyan(),
                        project.id.dimmed()
                    ));
                })
                .await;

            if let Err(e) = result {
                spinner.finish_and_clear();
                output::failure(&e.user_message());
                return Err(anyhow!("project was not created"));
            }
        }

        ProjectCommands::List { all } => {
            let spinner = output::spinner("Fetching projects...");
            let projects = if all {
                ctx.api.list_projects(None).await
            } else {
                ctx.store().list_owned_projects().await
            };
            spinner.finish_and_clear();
            match projects {
                Ok(projects) => output::print_projects_table(&projects),
                Err(e) => {
                    output::failure(&e.user_message());
                    return Err(anyhow!("could not list projects"));
                }
            }
        }

        ProjectCommands::Show { id } => {
            let store = ctx.load(&id).await?;
            output::print_project(&store);
        }
    }

    Ok(())
}
