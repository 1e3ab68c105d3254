use std::fmt::Display;

/// Result of a membership lookup, classified for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipOutcome {
    Member,
    Forbidden,
    NotMember,
    Unknown { status: u16 },
    Error { message: String },
}

/// Map a lookup status code to its outcome. Total over `u16`.
pub fn classify_status(status: u16) -> MembershipOutcome {
    match status {
        204 => MembershipOutcome::Member,
        302 => MembershipOutcome::Forbidden,
        404 => MembershipOutcome::NotMember,
        status => MembershipOutcome::Unknown { status },
    }
}

/// Map a lookup result, successful or not, to exactly one outcome.
pub fn classify_lookup<E: Display>(lookup: Result<u16, &E>) -> MembershipOutcome {
    match lookup {
        Ok(status) => classify_status(status),
        Err(error) => MembershipOutcome::Error {
            message: error.to_string(),
        },
    }
}

impl MembershipOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Forbidden => "forbidden",
            Self::NotMember => "not_member",
            Self::Unknown { .. } => "unknown",
            Self::Error { .. } => "error",
        }
    }

    /// Comment body posted to the thread for this outcome.
    pub fn render_comment(&self, username: &str, org: &str) -> String {
        match self {
            Self::Member => format!("{username} is a member of the {org} organization"),
            Self::Forbidden => "You are not authorized to make this request".to_string(),
            Self::NotMember => format!("{username} is not a member of the {org} organization"),
            Self::Unknown { .. } => format!("Unable to determine membership for {username}"),
            Self::Error { message } => {
                format!("An error occurred while checking membership: {message}")
            }
        }
    }

    /// Operator-facing log line describing the outcome.
    pub fn render_log_line(&self, username: &str, org: &str) -> String {
        match self {
            Self::Member => format!("User {username} is a member of {org}"),
            Self::Forbidden => "Requestor not authorized to perform this action".to_string(),
            Self::NotMember => format!("User {username} is not a member of {org}"),
            Self::Unknown { status } => format!("Unknown response from GitHub API: {status}"),
            Self::Error { message } => format!("Membership lookup failed: {message}"),
        }
    }
}
