use std::fmt;

use url::Url;

/// Static description of one backend: where it lives and which environment variables hold its
/// secrets. Built once at startup and never changed afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Service {
    /// Short human name, used in logs and diagnostics.
    pub name: String,
    /// The browsable base URL. Queries are matched against its host.
    pub url: Url,
    /// Where REST calls are sent.
    pub api_url: Url,
    pub credentials: CredentialKeys,
}

/// Names of the environment variables a [`Service`] reads its secrets from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CredentialKeys {
    /// User + API token, sent as HTTP basic auth (Atlassian Cloud).
    Basic { user: String, token: String },
    /// A single personal access token (GitHub and GitHub Enterprise).
    Token { token: String },
}

impl Service {
    pub const ATLASSIAN_URL: &'static str = "https://smartthings.atlassian.net";
    pub const GITHUB_URL: &'static str = "https://github.com";
    pub const GITHUB_API_URL: &'static str = "https://api.github.com";
    pub const ECODESAMSUNG_URL: &'static str = "https://github.ecodesamsung.com";

    /// Does the host of `query` match the host of this service?
    ///
    /// Anything that doesn't parse as an absolute URL (bare keys, free text) is not a match, and
    /// neither is anything when this service's own URL has no host.
    #[must_use]
    pub fn url_matches(&self, query: &str) -> bool {
        let Some(our_host) = self.url.host_str() else {
            return false;
        };
        let Ok(parsed) = Url::parse(query) else {
            return false;
        };
        parsed.host_str() == Some(our_host) && parsed.port() == self.url.port()
    }

    /// The path of `query` below this service's own path, when `query` is on this service at all.
    ///
    /// A service at `https://example.com/jira` sees `https://example.com/jira/browse/PROJ-42` as
    /// `/browse/PROJ-42`, and nothing at all for `https://example.com/wiki/...`.
    #[must_use]
    pub fn relative_path(&self, query: &str) -> Option<String> {
        if !self.url_matches(query) {
            return None;
        }
        let parsed = Url::parse(query).ok()?;
        let prefix = self.url.path().trim_end_matches('/');
        let rest = parsed.path().strip_prefix(prefix)?;
        (rest.is_empty() || rest.starts_with('/')).then(|| rest.to_string())
    }

    /// The base URL as a string with no trailing slash, ready to have paths appended.
    #[must_use]
    pub fn base(&self) -> &str {
        self.url.as_str().trim_end_matches('/')
    }

    /// The API URL as a string with no trailing slash.
    #[must_use]
    pub fn api_base(&self) -> &str {
        self.api_url.as_str().trim_end_matches('/')
    }

    /// The host part of [`Self::url`], falling back to the full URL for host-less ones.
    #[must_use]
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_else(|| self.url.as_str())
    }

    /// The REST API root GitHub serves for a given web host.
    pub(crate) fn default_github_api_url(url: &Url) -> Result<Url, url::ParseError> {
        if url.host_str() == Some("github.com") {
            Url::parse(Self::GITHUB_API_URL)
        } else {
            Url::parse(&format!("{}/api/v3", url.as_str().trim_end_matches('/')))
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.host())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod test_url_matches {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn service(url: &str) -> Service {
        let url = Url::parse(url).unwrap();
        Service {
            name: "test".to_string(),
            api_url: url.clone(),
            url,
            credentials: CredentialKeys::Token {
                token: "TEST_TOKEN".to_string(),
            },
        }
    }

    #[rstest]
    #[case("https://github.com/org/repo/pull/7", true)]
    #[case("http://github.com/org/repo", true)]
    #[case("https://github.com", true)]
    #[case("https://GitHub.com/org/repo", true)]
    #[case("https://github.com:8443/org/repo", false)]
    #[case("https://github.ecodesamsung.com/org/repo/pull/7", false)]
    #[case("github.com/org/repo/pull/7", false)]
    #[case("PROJ-42", false)]
    #[case("not a valid anything", false)]
    #[case("", false)]
    #[case("https://", false)]
    fn matches_host(#[case] query: &str, #[case] expected: bool) {
        assert_eq!(service("https://github.com").url_matches(query), expected);
    }

    #[test]
    fn host_less_service_never_matches() {
        let service = service("mailto:someone@example.com");
        assert!(!service.url_matches("mailto:someone@example.com"));
        assert!(!service.url_matches("https://example.com"));
    }

    #[rstest]
    #[case("https://github.com", "https://github.com/org/repo/pull/7", Some("/org/repo/pull/7"))]
    #[case("https://github.com/", "https://github.com", Some("/"))]
    #[case("https://example.com/jira/", "https://example.com/jira/browse/PROJ-42", Some("/browse/PROJ-42"))]
    #[case("https://example.com/jira", "https://example.com/jira/browse/PROJ-42", Some("/browse/PROJ-42"))]
    #[case("https://example.com/jira", "https://example.com/jira", Some(""))]
    #[case("https://example.com/jira", "https://example.com/jiraffe/browse/PROJ-42", None)]
    #[case("https://example.com/jira", "https://example.com/browse/PROJ-42", None)]
    #[case("https://example.com/jira", "https://other.com/jira/browse/PROJ-42", None)]
    #[case("https://example.com/jira", "PROJ-42", None)]
    fn relative_path_strips_service_path(
        #[case] service_url: &str,
        #[case] query: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(
            service(service_url).relative_path(query).as_deref(),
            expected
        );
    }

    #[test]
    fn base_has_no_trailing_slash() {
        assert_eq!(service("https://github.com").base(), "https://github.com");
        assert_eq!(
            service("https://example.com/jira/").base(),
            "https://example.com/jira"
        );
    }

    #[test]
    fn github_api_urls() {
        let public = Url::parse(Service::GITHUB_URL).unwrap();
        assert_eq!(
            Service::default_github_api_url(&public).unwrap().as_str(),
            "https://api.github.com/"
        );
        let enterprise = Url::parse(Service::ECODESAMSUNG_URL).unwrap();
        assert_eq!(
            Service::default_github_api_url(&enterprise)
                .unwrap()
                .as_str(),
            "https://github.ecodesamsung.com/api/v3"
        );
    }
}
