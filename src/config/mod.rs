use std::{
    fs, io,
    path::{Path, PathBuf},
};

use miette::{Diagnostic, NamedSource, SourceSpan};
use platform_dirs::AppDirs;
use thiserror::Error;
use url::Url;

use self::toml::{ConfigLoader, Spanned};
use crate::service::{CredentialKeys, Service};

mod toml;

/// Every service revlink knows how to talk to, after defaults are applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub atlassian: Service,
    pub github: Vec<Service>,
}

impl Default for Config {
    #[allow(clippy::unwrap_used)] // The built-in URLs are constants that parse.
    fn default() -> Self {
        let atlassian = Url::parse(Service::ATLASSIAN_URL).unwrap();
        let github = Url::parse(Service::GITHUB_URL).unwrap();
        let ecodesamsung = Url::parse(Service::ECODESAMSUNG_URL).unwrap();
        Self {
            atlassian: Service {
                name: "Atlassian".to_string(),
                api_url: atlassian.clone(),
                url: atlassian,
                credentials: default_atlassian_keys(None, None),
            },
            github: vec![
                Service {
                    name: "GitHub".to_string(),
                    api_url: Service::default_github_api_url(&github).unwrap(),
                    url: github,
                    credentials: CredentialKeys::Token {
                        token: "GITHUB_TOKEN".to_string(),
                    },
                },
                Service {
                    name: "Ecodesamsung".to_string(),
                    api_url: Service::default_github_api_url(&ecodesamsung).unwrap(),
                    url: ecodesamsung,
                    credentials: CredentialKeys::Token {
                        token: "ECODESAMSUNG_TOKEN".to_string(),
                    },
                },
            ],
        }
    }
}

fn default_atlassian_keys(user: Option<String>, token: Option<String>) -> CredentialKeys {
    CredentialKeys::Basic {
        user: user.unwrap_or_else(|| "ATLASSIAN_ID".to_string()),
        token: token.unwrap_or_else(|| "ATLASSIAN_TOKEN".to_string()),
    }
}

impl Config {
    const FILE_NAME: &'static str = "config.toml";

    /// Load from `path` if given, otherwise from the platform config directory if a file exists
    /// there, otherwise fall back to the built-in defaults.
    ///
    /// ## Errors
    /// 1. `path` was given but can't be read
    /// 2. The file isn't valid TOML or doesn't match the schema
    /// 3. A URL in the file doesn't parse
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    log::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };
        let source_code = fs::read_to_string(&path).map_err(|source| Error::Read {
            path: path.clone(),
            source,
        })?;
        log::debug!("Loading config from {}", path.display());
        Self::parse(&path.display().to_string(), &source_code)
    }

    fn default_path() -> Option<PathBuf> {
        AppDirs::new(Some(env!("CARGO_PKG_NAME")), false)
            .map(|dirs| dirs.config_dir.join(Self::FILE_NAME))
    }

    /// Parse config file contents. Sections that are present replace the matching defaults
    /// wholesale.
    pub(crate) fn parse(name: &str, source_code: &str) -> Result<Self, Error> {
        let loader: ConfigLoader =
            ::toml::from_str(source_code).map_err(|err| Error::Toml {
                message: err.message().to_string(),
                span: err.span().map(SourceSpan::from),
                source_code: NamedSource::new(name, source_code.to_string()),
            })?;
        let url = |spanned: Spanned<String>| -> Result<Url, Error> {
            let span = spanned.span();
            let value = spanned.into_inner();
            Url::parse(&value).map_err(|reason| Error::InvalidUrl {
                url: value,
                reason,
                span: span.into(),
                source_code: NamedSource::new(name, source_code.to_string()),
            })
        };
        let defaults = Self::default();

        let atlassian = match loader.atlassian {
            None => defaults.atlassian,
            Some(atlassian) => {
                let url = url(atlassian.url)?;
                Service {
                    name: "Atlassian".to_string(),
                    api_url: url.clone(),
                    url,
                    credentials: default_atlassian_keys(atlassian.user_env, atlassian.token_env),
                }
            }
        };

        let github = match loader.github {
            None => defaults.github,
            Some(hosts) => hosts
                .into_iter()
                .map(|host| {
                    let url_span = host.url.span();
                    let web_url = url(host.url)?;
                    let api_url = match host.api_url {
                        Some(api_url) => url(api_url)?,
                        None => Service::default_github_api_url(&web_url).map_err(|reason| {
                            Error::InvalidUrl {
                                url: web_url.to_string(),
                                reason,
                                span: url_span.into(),
                                source_code: NamedSource::new(name, source_code.to_string()),
                            }
                        })?,
                    };
                    Ok(Service {
                        name: host
                            .name
                            .or_else(|| web_url.host_str().map(str::to_string))
                            .unwrap_or_else(|| web_url.to_string()),
                        url: web_url,
                        api_url,
                        credentials: CredentialKeys::Token {
                            token: host.token_env,
                        },
                    })
                })
                .collect::<Result<Vec<_>, Error>>()?,
        };

        Ok(Self { atlassian, github })
    }
}

#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    #[error("Could not read config file {path}: {source}")]
    #[diagnostic(
        code(config::read),
        help("Check the path passed with --config or REVLINK_CONFIG.")
    )]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("The config file is invalid: {message}")]
    #[diagnostic(code(config::toml), help("Check the TOML is valid."))]
    Toml {
        message: String,
        #[label("here")]
        span: Option<SourceSpan>,
        #[source_code]
        source_code: NamedSource,
    },
    #[error("{url} is not a valid URL: {reason}")]
    #[diagnostic(
        code(config::invalid_url),
        help("URLs need a scheme and host, like https://example.atlassian.net")
    )]
    InvalidUrl {
        url: String,
        reason: url::ParseError,
        #[label("defined here")]
        span: SourceSpan,
        #[source_code]
        source_code: NamedSource,
    },
}
