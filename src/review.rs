use log::{debug, info};
use miette::Diagnostic;

use crate::{
    app_config::{self, Credentials},
    integrations::{self, Client, Remote},
    registry::Registry,
    service::Service,
    state::RunType,
};

/// Resolve `query` against `registry` and produce its review line.
///
/// `Ok(None)` means no handler recognized the query, which is not an error.
pub(crate) fn review(query: RunType<&str>, registry: &Registry) -> Result<Option<String>, Error> {
    review_with(query, registry, Client::new)
}

/// [`review`], with the client construction swapped out. `connect` is only called once a handler
/// has matched and its credentials are all present.
pub(crate) fn review_with<R: Remote>(
    query: RunType<&str>,
    registry: &Registry,
    connect: impl FnOnce(&Service, &Credentials) -> Result<R, integrations::Error>,
) -> Result<Option<String>, Error> {
    let (run_type, query) = query.take();
    let Some(identified) = registry.identify(query) else {
        info!("No handler recognized {query:?}");
        return Ok(None);
    };
    debug!("{} claimed {query:?}", identified.variant);

    let credentials = Credentials::from_env(&identified.service().credentials)?;

    if let RunType::DryRun(()) = run_type {
        return Ok(Some(identified.describe()));
    }

    let remote = connect(identified.service(), &credentials)?;
    let resolved = identified.fetch(&remote)?;
    Ok(Some(resolved.review()))
}

#[derive(Debug, Diagnostic, thiserror::Error)]
pub(crate) enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    AppConfig(#[from] app_config::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Integration(#[from] integrations::Error),
}
