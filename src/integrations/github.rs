use serde::Deserialize;

pub(crate) const ACCEPT: &str = "application/vnd.github+json";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    pub title: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct GitHubIssue {
    pub title: String,
    /// Canonical browser link, which is what reviews point at.
    pub html_url: String,
}

pub(crate) fn pull_request_url(api_base: &str, repo: &str, number: u64) -> String {
    format!("{api_base}/repos/{repo}/pulls/{number}")
}

pub(crate) fn issue_url(api_base: &str, repo: &str, number: u64) -> String {
    format!("{api_base}/repos/{repo}/issues/{number}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod test_payloads {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn decode_issue() {
        let body = r#"{
            "number": 12,
            "title": "Widget wobbles",
            "state": "open",
            "html_url": "https://github.com/team/widget/issues/12"
        }"#;
        let issue: GitHubIssue = serde_json::from_str(body).unwrap();
        assert_eq!(
            issue,
            GitHubIssue {
                title: "Widget wobbles".to_string(),
                html_url: "https://github.com/team/widget/issues/12".to_string(),
            }
        );
    }

    #[test]
    fn enterprise_urls() {
        let base = "https://github.ecodesamsung.com/api/v3";
        assert_eq!(
            pull_request_url(base, "team/widget", 7),
            "https://github.ecodesamsung.com/api/v3/repos/team/widget/pulls/7"
        );
        assert_eq!(
            issue_url(base, "team/widget", 12),
            "https://github.ecodesamsung.com/api/v3/repos/team/widget/issues/12"
        );
    }
}
