//! Extract → Lookup → Classify → Report flow for one invocation.

use async_trait::async_trait;
use orgcheck_github::{GithubApiClient, GithubApiError};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::invocation::InvocationContext;
use crate::outcome::{classify_lookup, MembershipOutcome};
use crate::username::extract_target_username;

/// Comment destined for the originating issue thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    pub owner: String,
    pub repo: String,
    pub issue_number: u64,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowReport {
    pub username: String,
    pub outcome: MembershipOutcome,
    pub comment: CommentRecord,
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Posting the result comment failed; there is no further channel to report on.
    #[error("{source}")]
    Report {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

#[async_trait]
/// Trait contract for the two GitHub calls the workflow makes.
pub trait MembershipApi: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn lookup_membership(&self, org: &str, username: &str) -> Result<u16, Self::Error>;

    async fn post_comment(&self, comment: &CommentRecord) -> Result<(), Self::Error>;
}

#[async_trait]
impl MembershipApi for GithubApiClient {
    type Error = GithubApiError;

    async fn lookup_membership(&self, org: &str, username: &str) -> Result<u16, Self::Error> {
        self.check_membership(org, username).await
    }

    async fn post_comment(&self, comment: &CommentRecord) -> Result<(), Self::Error> {
        let created = self
            .create_issue_comment(
                &comment.owner,
                &comment.repo,
                comment.issue_number,
                &comment.body,
            )
            .await?;
        info!(
            comment_id = created.id,
            html_url = created.html_url.as_deref().unwrap_or("unavailable"),
            "posted membership comment"
        );
        Ok(())
    }
}

/// Run one membership check and post exactly one comment describing it.
///
/// Lookup failures are reported on the thread as an error outcome. Only a
/// failure to post the comment is returned as an error.
pub async fn run_membership_check<A>(
    api: &A,
    context: &InvocationContext,
) -> Result<WorkflowReport, WorkflowError>
where
    A: MembershipApi + ?Sized,
{
    let org = context.org();
    let username = extract_target_username(context.body());
    info!(
        username = %username,
        org = %org,
        "Checking if user {username} is a member of {org}"
    );

    let lookup = api.lookup_membership(org, &username).await;
    if let Err(lookup_error) = &lookup {
        warn!(error = %lookup_error, "membership lookup failed");
    }
    let outcome = classify_lookup(lookup.as_ref().copied());
    info!(
        outcome = outcome.label(),
        "{}",
        outcome.render_log_line(&username, org)
    );

    let comment = CommentRecord {
        owner: org.to_string(),
        repo: context.repo().to_string(),
        issue_number: context.issue_number(),
        body: outcome.render_comment(&username, org),
    };
    info!(
        issue_number = comment.issue_number,
        "Sending response: {}",
        comment.body
    );
    if let Err(post_error) = api.post_comment(&comment).await {
        error!(error = %post_error, "failed to post membership comment");
        return Err(WorkflowError::Report {
            source: Box::new(post_error),
        });
    }

    Ok(WorkflowReport {
        username,
        outcome,
        comment,
    })
}
