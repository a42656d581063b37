use serde::Deserialize;

/// The parts of a Confluence content object we care about.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    #[serde(rename = "_links")]
    pub links: PageLinks,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PageLinks {
    /// Root of the wiki, e.g. `https://example.atlassian.net/wiki`.
    pub base: String,
    /// Path of the page relative to `base`.
    pub webui: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct JiraIssue {
    pub fields: JiraIssueFields,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct JiraIssueFields {
    pub summary: String,
}

pub(crate) fn page_url(api_base: &str, id: &str) -> String {
    format!("{api_base}/wiki/rest/api/content/{id}")
}

pub(crate) fn issue_url(api_base: &str, key: &str) -> String {
    format!("{api_base}/rest/api/2/issue/{key}?fields=summary")
}
