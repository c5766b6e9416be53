//! Compliance command.

use anyhow::{anyhow, Result};
use clap::Args;

use super::Context;
use crate::output;

#[derive(Args)]
pub struct ComplianceArgs {
    /// Project ID
    pub id: String,
}

pub async fn execute(args: ComplianceArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.load(&args.id).await?;

    let spinner = output::spinner("Checking compliance...");
    let result = store.request_compliance_check().await;
    spinner.finish_and_clear();

    match result {
        Ok(status) => {
            if let Some(feedback) = store.feedback() {
                output::success(feedback);
            }
            output::print_compliance(&status);
            Ok(())
        }
        Err(e) => {
            output::failure(&e.user_message());
            Err(anyhow!("compliance check failed"))
        }
    }
}
