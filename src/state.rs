/// Whether this invocation should really hit the network, or only report what it would do.
#[derive(Clone, Copy, Debug)]
pub(crate) enum RunType<T> {
    /// Resolve the query and check credentials, then describe the request instead of sending it.
    DryRun(T),
    /// Actually fetch.
    Real(T),
}

impl<T> RunType<T> {
    pub(crate) fn take(self) -> (RunType<()>, T) {
        match self {
            RunType::DryRun(inner) => (RunType::DryRun(()), inner),
            RunType::Real(inner) => (RunType::Real(()), inner),
        }
    }
}
