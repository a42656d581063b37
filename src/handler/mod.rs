use std::{fmt, rc::Rc};

pub use self::extract::{GitHubRef, Identifier};
use crate::{
    integrations::{self, atlassian, github, GitHubIssue, JiraIssue, Page, PullRequest, Remote},
    service::Service,
};

mod extract;

/// The closed set of things a query can point at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    ConfluencePage,
    JiraIssue,
    PullRequest,
    Issue,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfluencePage => write!(f, "Confluence page"),
            Self::JiraIssue => write!(f, "Jira issue"),
            Self::PullRequest => write!(f, "pull request"),
            Self::Issue => write!(f, "issue"),
        }
    }
}

/// One registered handler: a [`Kind`] bound to the [`Service`] it talks to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variant {
    pub kind: Kind,
    pub service: Rc<Service>,
}

impl Variant {
    #[must_use]
    pub fn new(kind: Kind, service: Rc<Service>) -> Self {
        Self { kind, service }
    }

    /// Pull this variant's identifier out of `query`, without touching the network.
    #[must_use]
    pub fn extract(&self, query: &str) -> Option<Identifier> {
        match self.kind {
            Kind::ConfluencePage => extract::confluence_page(&self.service, query),
            Kind::JiraIssue => extract::jira_issue(&self.service, query),
            Kind::PullRequest => extract::github_pull_request(&self.service, query),
            Kind::Issue => extract::github_issue(&self.service, query),
        }
    }

    /// Whether this variant claims `query`. Always agrees with [`Self::extract`].
    #[must_use]
    pub fn can_handle(&self, query: &str) -> bool {
        self.extract(query).is_some()
    }

    /// Move a query from "just a string" to "identified by this variant".
    #[must_use]
    pub fn identify(&self, query: &str) -> Option<Identified> {
        self.extract(query).map(|identifier| Identified {
            variant: self.clone(),
            identifier,
        })
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.kind, self.service)
    }
}

/// A query that a [`Variant`] has claimed, not yet fetched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identified {
    pub variant: Variant,
    pub identifier: Identifier,
}

impl Identified {
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.variant.service
    }

    /// The REST endpoint [`Self::fetch`] will call.
    #[must_use]
    pub fn endpoint(&self) -> String {
        let api_base = self.service().api_base();
        match (&self.identifier, self.variant.kind) {
            (Identifier::PageId(id), _) => atlassian::page_url(api_base, id),
            (Identifier::IssueKey(key), _) => atlassian::issue_url(api_base, key),
            (Identifier::GitHub(target), Kind::Issue) => {
                github::issue_url(api_base, &target.repo(), target.number)
            }
            (Identifier::GitHub(target), _) => {
                github::pull_request_url(api_base, &target.repo(), target.number)
            }
        }
    }

    /// A one-line description of what fetching would do, for dry runs.
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "Would fetch {} {} from {}",
            self.variant.kind,
            self.identifier,
            self.endpoint()
        )
    }

    /// Make the one remote call for this item.
    ///
    /// ## Errors
    /// Whatever `remote` returns; nothing is retried.
    pub fn fetch(self, remote: &dyn Remote) -> Result<Resolved, integrations::Error> {
        let Self {
            variant,
            identifier,
        } = self;
        let service = variant.service;
        Ok(match (identifier, variant.kind) {
            (Identifier::PageId(id), _) => Resolved::ConfluencePage {
                page: remote.get_page_by_id(&id)?,
            },
            (Identifier::IssueKey(key), _) => Resolved::JiraIssue {
                issue: remote.get_issue(&key)?,
                service,
                key,
            },
            (Identifier::GitHub(target), Kind::Issue) => Resolved::Issue {
                issue: remote.get_issue_by_number(&target.repo(), target.number)?,
                github: target,
            },
            (Identifier::GitHub(target), _) => Resolved::PullRequest {
                pull_request: remote.get_pull_request(&target.repo(), target.number)?,
                service,
                github: target,
            },
        })
    }
}

/// A fetched item, ready to be turned into a review line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolved {
    ConfluencePage {
        page: Page,
    },
    JiraIssue {
        service: Rc<Service>,
        key: String,
        issue: JiraIssue,
    },
    PullRequest {
        service: Rc<Service>,
        github: GitHubRef,
        pull_request: PullRequest,
    },
    Issue {
        github: GitHubRef,
        issue: GitHubIssue,
    },
}

impl Resolved {
    /// Canonical deep link to the item.
    #[must_use]
    pub fn link(&self) -> String {
        match self {
            Self::ConfluencePage { page } => format!("{}{}", page.links.base, page.links.webui),
            Self::JiraIssue { service, key, .. } => format!("{}/browse/{key}", service.base()),
            Self::PullRequest {
                service, github, ..
            } => format!("{}{}", service.base(), github.pull_path()),
            Self::Issue { issue, .. } => issue.html_url.clone(),
        }
    }

    /// Human-readable text for the link.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::ConfluencePage { page } => format!("Confluence >> {}", page.title),
            Self::JiraIssue { key, issue, .. } => format!("{key} >> {}", issue.fields.summary),
            Self::PullRequest {
                github,
                pull_request,
                ..
            } => format!("{} #{} >> {}", github.name, github.number, pull_request.title),
            Self::Issue { github, issue } => {
                format!("{} #{} >> {}", github.name, github.number, issue.title)
            }
        }
    }

    /// `[[<link>|<label>]]`
    #[must_use]
    pub fn review(&self) -> String {
        format!("[[{}|{}]]", self.link(), self.label())
    }
}
