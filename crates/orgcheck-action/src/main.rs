mod action_output;
mod bootstrap_helpers;
mod cli_args;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use orgcheck_github::GithubApiClient;
use orgcheck_membership::{run_membership_check, InvocationContext, WorkflowReport};
use tracing::{error, info};

use crate::action_output::signal_failure;
use crate::bootstrap_helpers::init_tracing;
use crate::cli_args::Cli;

async fn run_action(cli: &Cli) -> Result<WorkflowReport> {
    let context = InvocationContext::from_inputs(&cli.invocation_inputs())?;
    let client = GithubApiClient::new(&cli.github_client_config(context.token()))?;
    let report = run_membership_check(&client, &context).await?;
    Ok(report)
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run_action(&cli).await {
        Ok(report) => {
            info!(
                username = %report.username,
                outcome = report.outcome.label(),
                issue_number = report.comment.issue_number,
                "membership check completed"
            );
            ExitCode::SUCCESS
        }
        Err(failure) => {
            let message = failure.to_string();
            error!(error = %message, "membership check failed");
            signal_failure(&message);
            ExitCode::FAILURE
        }
    }
}
