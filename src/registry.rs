use std::rc::Rc;

use crate::{
    config::Config,
    handler::{Identified, Kind, Variant},
};

/// The ordered list of handlers a query is tried against. The first one that claims a query wins.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    variants: Vec<Variant>,
}

impl Registry {
    #[must_use]
    pub fn new(variants: impl IntoIterator<Item = Variant>) -> Self {
        let mut registry = Self::default();
        for variant in variants {
            registry.register(variant);
        }
        registry
    }

    /// Build the standard handler order for `config`: Confluence, Jira, then a pull request and an
    /// issue handler per GitHub host, in the order the hosts are configured.
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        let atlassian = Rc::new(config.atlassian);
        let github = config.github.into_iter().map(Rc::new).flat_map(|host| {
            [
                Variant::new(Kind::PullRequest, host.clone()),
                Variant::new(Kind::Issue, host),
            ]
        });
        Self::new(
            [
                Variant::new(Kind::ConfluencePage, atlassian.clone()),
                Variant::new(Kind::JiraIssue, atlassian),
            ]
            .into_iter()
            .chain(github),
        )
    }

    /// Add a handler to the end of the list. Registering the same handler twice is a no-op.
    pub fn register(&mut self, variant: Variant) {
        if self.variants.contains(&variant) {
            log::debug!("{variant} is already registered");
        } else {
            self.variants.push(variant);
        }
    }

    /// The first registered handler that claims `query`, if any.
    #[must_use]
    pub fn find_handler(&self, query: &str) -> Option<&Variant> {
        self.variants
            .iter()
            .find(|variant| variant.can_handle(query))
    }

    /// Like [`Self::find_handler`], but keeps the identifier the handler pulled out.
    #[must_use]
    pub fn identify(&self, query: &str) -> Option<Identified> {
        self.variants
            .iter()
            .find_map(|variant| variant.identify(query))
    }

    pub fn variants(&self) -> impl Iterator<Item = &Variant> {
        self.variants.iter()
    }
}
