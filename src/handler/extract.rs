//! Pure, network-free decomposition of a query into the identifier a backend understands.

use std::{fmt, sync::LazyLock};

use regex::Regex;

use crate::service::Service;

#[allow(clippy::unwrap_used)]
static CONFLUENCE_PAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:/wiki/spaces/[^/]+/pages/)?(\d+)").unwrap());
#[allow(clippy::unwrap_used)]
static JIRA_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:/browse/)?([A-Za-z][A-Za-z0-9]*-\d+)").unwrap());
#[allow(clippy::unwrap_used)]
static JIRA_BARE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*-\d+").unwrap());
#[allow(clippy::unwrap_used)]
static GITHUB_PULL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/([^/]+)/([^/]+)/pull/(\d+)").unwrap());
#[allow(clippy::unwrap_used)]
static GITHUB_ISSUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/([^/]+)/([^/]+)/issues/(\d+)").unwrap());

/// The decomposed, backend-specific key pulled out of a query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Identifier {
    /// A Confluence page id, always a run of digits.
    PageId(String),
    /// A Jira issue key like `PROJ-42`.
    IssueKey(String),
    /// A pull request or issue on a GitHub-compatible host.
    GitHub(GitHubRef),
}

/// `<host>/<org>/<name>/{pull,issues}/<number>`, minus the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GitHubRef {
    pub org: String,
    pub name: String,
    pub number: u64,
}

impl GitHubRef {
    /// `org/name`, the form the REST API wants.
    #[must_use]
    pub fn repo(&self) -> String {
        format!("{}/{}", self.org, self.name)
    }

    pub(crate) fn pull_path(&self) -> String {
        format!("/{}/{}/pull/{}", self.org, self.name, self.number)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageId(id) => write!(f, "{id}"),
            Self::IssueKey(key) => write!(f, "{key}"),
            Self::GitHub(github) => write!(f, "{}#{}", github.repo(), github.number),
        }
    }
}

/// A numeric page id from `/wiki/spaces/<space>/pages/<id>/...` on the Confluence host. Never
/// falls back to bare ids.
pub(crate) fn confluence_page(service: &Service, query: &str) -> Option<Identifier> {
    let path = service.relative_path(query)?;
    let captures = CONFLUENCE_PAGE.captures(&path)?;
    Some(Identifier::PageId(captures[1].to_string()))
}

/// A Jira issue key, either from `/browse/<KEY>` on the Jira host or, for any other query, a bare
/// key at the very start of it.
///
/// The bare-key fallback looks at the raw query rather than a parsed URL path. Web URLs on other
/// hosts start with `http:` or `https:`, which the key pattern rejects.
pub(crate) fn jira_issue(service: &Service, query: &str) -> Option<Identifier> {
    if service.url_matches(query) {
        let path = service.relative_path(query)?;
        let captures = JIRA_PATH.captures(&path)?;
        Some(Identifier::IssueKey(captures[1].to_string()))
    } else {
        JIRA_BARE_KEY
            .find(query)
            .map(|key| Identifier::IssueKey(key.as_str().to_string()))
    }
}

/// `/<org>/<repo>/pull/<number>` on this exact GitHub host.
pub(crate) fn github_pull_request(service: &Service, query: &str) -> Option<Identifier> {
    github_ref(&GITHUB_PULL, service, query)
}

/// `/<org>/<repo>/issues/<number>` on this exact GitHub host.
pub(crate) fn github_issue(service: &Service, query: &str) -> Option<Identifier> {
    github_ref(&GITHUB_ISSUE, service, query)
}

fn github_ref(pattern: &Regex, service: &Service, query: &str) -> Option<Identifier> {
    let path = service.relative_path(query)?;
    let captures = pattern.captures(&path)?;
    let number = captures[3].parse().ok()?;
    Some(Identifier::GitHub(GitHubRef {
        org: captures[1].to_string(),
        name: captures[2].to_string(),
        number,
    }))
}
