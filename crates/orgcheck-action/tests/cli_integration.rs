use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;

const INPUT_ENV_VARS: [&str; 5] = [
    "INPUT_BODY",
    "INPUT_ORG",
    "INPUT_REPO",
    "INPUT_ISSUE_NUMBER",
    "INPUT_TOKEN",
];

fn orgcheck_command(api_base: &str) -> Command {
    let mut command = Command::cargo_bin("orgcheck").expect("orgcheck binary");
    for name in INPUT_ENV_VARS {
        command.env_remove(name);
    }
    command
        .env("ORGCHECK_GITHUB_API_BASE", api_base)
        .env("RUST_LOG", "info");
    command
}

#[test]
fn functional_member_check_posts_comment_and_succeeds() {
    let server = MockServer::start();
    let lookup = server.mock(|when, then| {
        when.method(GET)
            .path("/orgs/acme/members/octocat")
            .header("authorization", "Bearer test-token");
        then.status(204);
    });
    let post = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/acme/widgets/issues/7/comments")
            .json_body(json!({"body": "octocat is a member of the acme organization"}));
        then.status(201).json_body(json!({
            "id": 501,
            "html_url": "https://example.test/comment/501"
        }));
    });

    orgcheck_command(&server.base_url())
        .env("INPUT_BODY", "Please check @octocat")
        .env("INPUT_ORG", "acme")
        .env("INPUT_REPO", "widgets")
        .env("INPUT_ISSUE_NUMBER", "7")
        .env("INPUT_TOKEN", "test-token")
        .assert()
        .success()
        .stdout(predicate::str::contains("::error::").not())
        .stderr(predicate::str::contains(
            "Checking if user octocat is a member of acme",
        ));

    lookup.assert_calls(1);
    post.assert_calls(1);
}

#[test]
fn functional_not_member_check_accepts_command_line_inputs() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/orgs/acme/members/ghost");
        then.status(404).json_body(json!({"message": "Not Found"}));
    });
    let post = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/acme/widgets/issues/3/comments")
            .json_body(json!({"body": "ghost is not a member of the acme organization"}));
        then.status(201).json_body(json!({"id": 502}));
    });

    orgcheck_command(&server.base_url())
        .args([
            "--body",
            "ghost",
            "--org",
            "acme",
            "--repo",
            "widgets",
            "--issue-number",
            "3",
            "--token",
            "test-token",
        ])
        .assert()
        .success();

    post.assert_calls(1);
}

#[test]
fn regression_missing_input_fails_before_any_request() {
    let server = MockServer::start();
    let lookup = server.mock(|when, then| {
        when.method(GET).path("/orgs/acme/members/octocat");
        then.status(204);
    });
    let post = server.mock(|when, then| {
        when.method(POST).path("/repos/acme/widgets/issues/7/comments");
        then.status(201).json_body(json!({"id": 504}));
    });

    orgcheck_command(&server.base_url())
        .env("INPUT_BODY", "Please check @octocat")
        .env("INPUT_ORG", "acme")
        .env("INPUT_REPO", "widgets")
        .env("INPUT_ISSUE_NUMBER", "7")
        .env("INPUT_TOKEN", "  ")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "::error::Input required and not supplied: TOKEN",
        ));

    lookup.assert_calls(0);
    post.assert_calls(0);
}

#[test]
fn regression_comment_post_failure_marks_step_failed_without_second_post() {
    let server = MockServer::start();
    let lookup = server.mock(|when, then| {
        when.method(GET).path("/orgs/acme/members/octocat");
        then.status(204);
    });
    let post = server.mock(|when, then| {
        when.method(POST).path("/repos/acme/widgets/issues/7/comments");
        then.status(403)
            .json_body(json!({"message": "Resource not accessible by integration"}));
    });

    orgcheck_command(&server.base_url())
        .env("INPUT_BODY", "@octocat")
        .env("INPUT_ORG", "acme")
        .env("INPUT_REPO", "widgets")
        .env("INPUT_ISSUE_NUMBER", "7")
        .env("INPUT_TOKEN", "test-token")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "::error::github api create issue comment failed with status 403",
        ))
        .stdout(predicate::str::contains(
            "Resource not accessible by integration",
        ));

    lookup.assert_calls(1);
    post.assert_calls(1);
}

#[test]
fn integration_lookup_server_error_is_reported_on_thread() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/orgs/acme/members/octocat");
        then.status(502).body("bad gateway");
    });
    let post = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/acme/widgets/issues/9/comments")
            .body_includes("An error occurred while checking membership: github api check membership failed with status 502");
        then.status(201).json_body(json!({"id": 503}));
    });

    orgcheck_command(&server.base_url())
        .env("INPUT_BODY", "can you check @octocat")
        .env("INPUT_ORG", "acme")
        .env("INPUT_REPO", "widgets")
        .env("INPUT_ISSUE_NUMBER", "9")
        .env("INPUT_TOKEN", "test-token")
        .assert()
        .success();

    post.assert_calls(1);
}

#[test]
fn integration_abuse_detection_on_lookup_logs_warning_and_reports_error() {
    let server = MockServer::start();
    let lookup = server.mock(|when, then| {
        when.method(GET).path("/orgs/acme/members/octocat");
        then.status(403)
            .json_body(json!({"message": "You have exceeded a secondary rate limit."}));
    });
    let post = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/acme/widgets/issues/11/comments")
            .body_includes("An error occurred while checking membership");
        then.status(201).json_body(json!({"id": 505}));
    });

    orgcheck_command(&server.base_url())
        .env("INPUT_BODY", "@octocat")
        .env("INPUT_ORG", "acme")
        .env("INPUT_REPO", "widgets")
        .env("INPUT_ISSUE_NUMBER", "11")
        .env("INPUT_TOKEN", "test-token")
        .assert()
        .success()
        .stderr(predicate::str::contains("abuse detected for request GET"))
        .stderr(predicate::str::contains("retrying after").not());

    lookup.assert_calls(1);
    post.assert_calls(1);
}

#[test]
fn integration_rate_limited_lookup_logs_quota_warning_and_single_retry() {
    let server = MockServer::start();
    let lookup = server.mock(|when, then| {
        when.method(GET).path("/orgs/acme/members/octocat");
        then.status(429).header("retry-after", "0");
    });
    let post = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/acme/widgets/issues/12/comments")
            .body_includes("An error occurred while checking membership");
        then.status(201).json_body(json!({"id": 506}));
    });

    orgcheck_command(&server.base_url())
        .env("INPUT_BODY", "@octocat")
        .env("INPUT_ORG", "acme")
        .env("INPUT_REPO", "widgets")
        .env("INPUT_ISSUE_NUMBER", "12")
        .env("INPUT_TOKEN", "test-token")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "request quota exhausted for request GET",
        ))
        .stderr(predicate::str::contains("retrying after 0 seconds"));

    lookup.assert_calls(2);
    post.assert_calls(1);
}
