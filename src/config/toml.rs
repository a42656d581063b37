use serde::Deserialize;
pub(crate) use toml::Spanned;

/// Loads a config file with span information on every URL, so that bad values can be pointed at.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigLoader {
    /// The Atlassian Cloud site serving both Confluence and Jira.
    pub(crate) atlassian: Option<Atlassian>,
    /// Every GitHub-compatible host to recognize, in match order.
    pub(crate) github: Option<Vec<GitHub>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Atlassian {
    pub(crate) url: Spanned<String>,
    /// Environment variable holding the account email. Defaults to `ATLASSIAN_ID`.
    pub(crate) user_env: Option<String>,
    /// Environment variable holding the API token. Defaults to `ATLASSIAN_TOKEN`.
    pub(crate) token_env: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct GitHub {
    /// Display name; the host is used when this is missing.
    pub(crate) name: Option<String>,
    pub(crate) url: Spanned<String>,
    /// Where the REST API lives. Derived from `url` when missing.
    pub(crate) api_url: Option<Spanned<String>>,
    /// Environment variable holding a personal access token for this host.
    pub(crate) token_env: String,
}
