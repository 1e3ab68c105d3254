use std::fmt;

use thiserror::Error;

pub const BODY_INPUT: &str = "BODY";
pub const ORG_INPUT: &str = "ORG";
pub const REPO_INPUT: &str = "REPO";
pub const ISSUE_NUMBER_INPUT: &str = "ISSUE_NUMBER";
pub const TOKEN_INPUT: &str = "TOKEN";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Input required and not supplied: {name}")]
    MissingInput { name: &'static str },
    #[error("invalid {name} '{value}', expected a positive integer")]
    InvalidIssueNumber { name: &'static str, value: String },
}

/// Raw action inputs as received from the environment or command line.
#[derive(Clone, Default)]
pub struct InvocationInputs {
    pub body: Option<String>,
    pub org: Option<String>,
    pub repo: Option<String>,
    pub issue_number: Option<String>,
    pub token: Option<String>,
}

/// Validated, immutable inputs for one membership check.
#[derive(Clone, PartialEq, Eq)]
pub struct InvocationContext {
    body: String,
    org: String,
    repo: String,
    issue_number: u64,
    token: String,
}

fn required_input(name: &'static str, raw: Option<&str>) -> Result<String, ConfigError> {
    let value = raw.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(ConfigError::MissingInput { name });
    }
    Ok(value.to_string())
}

fn parse_issue_number(raw: &str) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidIssueNumber {
            name: ISSUE_NUMBER_INPUT,
            value: raw.to_string(),
        }),
    }
}

impl InvocationContext {
    /// Validate every input before any network activity. Values are trimmed;
    /// empty values count as missing.
    pub fn from_inputs(inputs: &InvocationInputs) -> Result<Self, ConfigError> {
        let body = required_input(BODY_INPUT, inputs.body.as_deref())?;
        let org = required_input(ORG_INPUT, inputs.org.as_deref())?;
        let repo = required_input(REPO_INPUT, inputs.repo.as_deref())?;
        let issue_number = required_input(ISSUE_NUMBER_INPUT, inputs.issue_number.as_deref())?;
        let token = required_input(TOKEN_INPUT, inputs.token.as_deref())?;
        Ok(Self {
            body,
            org,
            repo,
            issue_number: parse_issue_number(&issue_number)?,
            token,
        })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn issue_number(&self) -> u64 {
        self.issue_number
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for InvocationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationContext")
            .field("body", &self.body)
            .field("org", &self.org)
            .field("repo", &self.repo)
            .field("issue_number", &self.issue_number)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for InvocationInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationInputs")
            .field("body", &self.body)
            .field("org", &self.org)
            .field("repo", &self.repo)
            .field("issue_number", &self.issue_number)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
