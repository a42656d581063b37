use miette::Diagnostic;
use reqwest::{
    blocking::Response,
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
};
use serde::de::DeserializeOwned;

pub use self::{
    atlassian::{JiraIssue, JiraIssueFields, Page, PageLinks},
    github::{GitHubIssue, PullRequest},
};
use crate::{app_config::Credentials, service::Service};

pub(crate) mod atlassian;
pub(crate) mod github;

/// The narrow set of calls handlers make against a backend. [`Client`] talks HTTP; tests swap in
/// canned data.
pub trait Remote {
    /// Fetch a Confluence page by its numeric id.
    fn get_page_by_id(&self, id: &str) -> Result<Page, Error>;
    /// Fetch a Jira issue by key, e.g. `PROJ-42`.
    fn get_issue(&self, key: &str) -> Result<JiraIssue, Error>;
    /// Fetch a pull request from `org/name`.
    fn get_pull_request(&self, repo: &str, number: u64) -> Result<PullRequest, Error>;
    /// Fetch an issue from `org/name`.
    fn get_issue_by_number(&self, repo: &str, number: u64) -> Result<GitHubIssue, Error>;
}

/// A blocking HTTP client bound to a single [`Service`] and its credentials.
pub struct Client {
    http: reqwest::blocking::Client,
    service: String,
    api_base: String,
}

impl Client {
    const USER_AGENT: &'static str = "revlink";

    /// Build a client for `service`. No request is sent until one of the [`Remote`] methods is
    /// called.
    ///
    /// ## Errors
    /// 1. The credentials contain bytes that can't go in an HTTP header
    /// 2. The TLS backend couldn't be initialized
    pub fn new(service: &Service, credentials: &Credentials) -> Result<Self, Error> {
        let mut authorization = HeaderValue::from_str(&credentials.authorization_header())
            .map_err(|_| Error::InvalidCredentials {
                service: service.name.clone(),
            })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        match credentials {
            Credentials::Token { .. } => {
                headers.insert(ACCEPT, HeaderValue::from_static(github::ACCEPT));
            }
            Credentials::Basic { .. } => {
                headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
            }
        }

        let http = reqwest::blocking::Client::builder()
            .user_agent(Self::USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|source| Error::Build {
                source,
                service: service.name.clone(),
            })?;
        Ok(Self {
            http,
            service: service.name.clone(),
            api_base: service.api_base().to_string(),
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str, activity: String) -> Result<T, Error> {
        log::debug!("GET {url}");
        self.http
            .get(url)
            .send()
            .and_then(Response::error_for_status)
            .map_err(|err| Error::ApiRequest {
                err: err.to_string(),
                service: self.service.clone(),
                activity: activity.clone(),
            })?
            .json()
            .map_err(|source| Error::ApiResponse {
                source,
                service: self.service.clone(),
                activity,
            })
    }
}

impl Remote for Client {
    fn get_page_by_id(&self, id: &str) -> Result<Page, Error> {
        self.get_json(
            &atlassian::page_url(&self.api_base, id),
            format!("fetching Confluence page {id}"),
        )
    }

    fn get_issue(&self, key: &str) -> Result<JiraIssue, Error> {
        self.get_json(
            &atlassian::issue_url(&self.api_base, key),
            format!("fetching Jira issue {key}"),
        )
    }

    fn get_pull_request(&self, repo: &str, number: u64) -> Result<PullRequest, Error> {
        self.get_json(
            &github::pull_request_url(&self.api_base, repo, number),
            format!("fetching pull request {repo}#{number}"),
        )
    }

    fn get_issue_by_number(&self, repo: &str, number: u64) -> Result<GitHubIssue, Error> {
        self.get_json(
            &github::issue_url(&self.api_base, repo, number),
            format!("fetching issue {repo}#{number}"),
        )
    }
}

#[derive(Debug, Diagnostic, thiserror::Error)]
pub enum Error {
    #[error("Could not communicate with {service} while {activity}: {err}")]
    #[diagnostic(
        code(integrations::api_request),
        help("Check your network connection, that the item exists, and that your token can read it")
    )]
    ApiRequest {
        err: String,
        service: String,
        activity: String,
    },
    #[error("Trouble decoding the response from {service} while {activity}: {source}")]
    #[diagnostic(
        code(integrations::api_response),
        help("The API may have changed shape, or the URL points at something that isn't an API")
    )]
    ApiResponse {
        source: reqwest::Error,
        service: String,
        activity: String,
    },
    #[error("The credentials for {service} can't be sent in an HTTP header")]
    #[diagnostic(
        code(integrations::invalid_credentials),
        help("Make sure the token variables contain only printable ASCII")
    )]
    InvalidCredentials { service: String },
    #[error("Could not set up an HTTP client for {service}: {source}")]
    #[diagnostic(code(integrations::build))]
    Build {
        source: reqwest::Error,
        service: String,
    },
}
