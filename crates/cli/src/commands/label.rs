use clap::Args;
use label_it_core::config::{load_label_it_config, LabelItConfig};
use label_it_core::rules::LabelAssignment;
use label_it_core::Labeler;
use label_it_developer_platforms::github::{
    create_basic_auth_client, create_token_client, GitHubProvider,
};
use octocrab::Octocrab;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::config::get_config_path;
use crate::errors::CliError;

#[cfg(test)]
#[path = "label_tests.rs"]
mod tests;

/// Printed instead of applying labels when `--dry` is set
pub const DRY_RUN_MESSAGE: &str = "Perform dry run. Pull requests were not updated.";

/// Question asked before any label is added
const CONFIRM_PROMPT: &str = "Do you want to continue? (y/n)";

/// Arguments for a labeling run
#[derive(Args, Debug)]
pub struct LabelArgs {
    /// Path to the rule configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Only list the labels that would be added
    #[arg(long)]
    pub dry: bool,

    /// Add the labels without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Formats the table of pull requests and the labels they will gain.
pub fn format_label_summary(assignments: &[LabelAssignment]) -> String {
    let mut summary = format!("Found {} matching pull request.\n", assignments.len());
    summary.push_str("PR\tLabels\n");
    summary.push_str("--\t------\n");
    for assignment in assignments {
        summary.push_str(&format!(
            "{}\t{}\n",
            assignment.issue,
            assignment.labels.join(", ")
        ));
    }

    summary
}

/// Asks whether the labels should be added.
///
/// `y`/`yes` confirm and `n`/`no` decline, ignoring case. Any other answer repeats
/// the question. End of input declines. With `auto_confirm` the answer `y` is echoed
/// and nothing is read.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    auto_confirm: bool,
) -> Result<bool, CliError> {
    loop {
        writeln!(output, "{}", CONFIRM_PROMPT)?;

        if auto_confirm {
            writeln!(output, "y")?;
            return Ok(true);
        }

        output.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            return Ok(false);
        }

        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => continue,
        }
    }
}

/// Creates the GitHub client for the configured credentials.
///
/// A configured user selects basic authentication, otherwise the token is sent as a
/// personal access token.
fn create_github_client(config: &LabelItConfig) -> Result<Octocrab, CliError> {
    let api_url = config.api_url.as_deref();
    let client = match &config.access.user {
        Some(user) => {
            debug!(user = user, "Using basic authentication");
            create_basic_auth_client(user, &config.access.token, api_url)?
        }
        None => {
            debug!("Using token authentication");
            create_token_client(&config.access.token, api_url)?
        }
    };

    Ok(client)
}

/// Executes a labeling run.
///
/// Loads the configuration, computes the labels for every open pull request and,
/// unless this is a dry run or the user declines, adds them.
#[instrument(skip(input, output))]
pub async fn execute<R: BufRead, W: Write>(
    args: LabelArgs,
    input: &mut R,
    output: &mut W,
) -> Result<(), CliError> {
    if matches!(args.config.as_deref(), Some(path) if path.trim().is_empty()) {
        return Err(CliError::InvalidArguments(
            "The configuration path must not be empty".to_string(),
        ));
    }

    let config_path = get_config_path(args.config.as_deref());
    info!(path = ?config_path, "Loading configuration");
    let config = load_label_it_config(&config_path)?;

    let client = create_github_client(&config)?;
    let provider = Arc::new(GitHubProvider::new(client));
    let labeler = Labeler::from_config(provider, &config)?;

    run(&labeler, args.dry, args.yes, input, output).await
}

/// Runs the list, match, confirm and apply steps against an existing labeler.
pub async fn run<P, R, W>(
    labeler: &Labeler<P>,
    dry_run: bool,
    auto_confirm: bool,
    input: &mut R,
    output: &mut W,
) -> Result<(), CliError>
where
    P: label_it_developer_platforms::PullRequestProvider + 'static,
    R: BufRead,
    W: Write,
{
    let pull_requests = labeler.list_open_pull_requests().await?;
    let assignments = labeler.determine_label_assignments(&pull_requests).await?;

    writeln!(output, "{}", format_label_summary(&assignments))?;

    if dry_run {
        writeln!(output, "{}", DRY_RUN_MESSAGE)?;
        return Ok(());
    }

    if assignments.is_empty() {
        return Ok(());
    }

    if !confirm(input, output, auto_confirm)? {
        info!("Labeling cancelled by the user");
        return Ok(());
    }

    for message in labeler.apply_label_assignments(&assignments).await? {
        writeln!(output, "{}", message)?;
    }

    Ok(())
}
