use clap::Parser;
use orgcheck_github::github_api_client::DEFAULT_GITHUB_API_BASE;
use orgcheck_github::retry_policy::DEFAULT_RATE_LIMIT_MAX_RETRIES;
use orgcheck_github::GithubApiClientConfig;
use orgcheck_membership::InvocationInputs;

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

/// Required inputs are optional here so that missing values are reported as
/// configuration errors by `InvocationContext` rather than by clap.
#[derive(Parser)]
#[command(
    name = "orgcheck",
    version,
    about = "Check whether a mentioned user belongs to a GitHub organization and reply on the issue"
)]
pub(crate) struct Cli {
    #[arg(
        long = "body",
        env = "INPUT_BODY",
        help = "Comment body whose last token names the user to check (leading @ is stripped)"
    )]
    pub(crate) body: Option<String>,

    #[arg(
        long = "org",
        env = "INPUT_ORG",
        help = "Organization to check membership against; also the owner of --repo"
    )]
    pub(crate) org: Option<String>,

    #[arg(
        long = "repo",
        env = "INPUT_REPO",
        help = "Repository name that owns the issue thread"
    )]
    pub(crate) repo: Option<String>,

    #[arg(
        long = "issue-number",
        env = "INPUT_ISSUE_NUMBER",
        help = "Issue or pull request number to comment on"
    )]
    pub(crate) issue_number: Option<String>,

    #[arg(
        long = "token",
        env = "INPUT_TOKEN",
        hide_env_values = true,
        help = "GitHub token used for API access"
    )]
    pub(crate) token: Option<String>,

    #[arg(
        long = "github-api-base",
        env = "ORGCHECK_GITHUB_API_BASE",
        default_value = DEFAULT_GITHUB_API_BASE,
        help = "GitHub API base URL"
    )]
    pub(crate) github_api_base: String,

    #[arg(
        long = "request-timeout-ms",
        env = "ORGCHECK_REQUEST_TIMEOUT_MS",
        default_value_t = 10_000,
        value_parser = parse_positive_u64,
        help = "Timeout in milliseconds for each GitHub API request"
    )]
    pub(crate) request_timeout_ms: u64,

    #[arg(
        long = "rate-limit-max-retries",
        env = "ORGCHECK_RATE_LIMIT_MAX_RETRIES",
        default_value_t = DEFAULT_RATE_LIMIT_MAX_RETRIES,
        help = "Maximum retries per request after a GitHub rate-limit response (0 disables retries)"
    )]
    pub(crate) rate_limit_max_retries: u32,
}

impl Cli {
    pub(crate) fn invocation_inputs(&self) -> InvocationInputs {
        InvocationInputs {
            body: self.body.clone(),
            org: self.org.clone(),
            repo: self.repo.clone(),
            issue_number: self.issue_number.clone(),
            token: self.token.clone(),
        }
    }

    pub(crate) fn github_client_config(&self, token: &str) -> GithubApiClientConfig {
        GithubApiClientConfig {
            api_base: self.github_api_base.clone(),
            token: token.to_string(),
            request_timeout_ms: self.request_timeout_ms,
            rate_limit_max_retries: self.rate_limit_max_retries,
        }
    }
}
