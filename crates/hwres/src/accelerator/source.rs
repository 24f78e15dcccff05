use std::future::Future;

use crate::accelerator::AcceleratorToken;

/// Where the accelerators of a node come from.
pub trait AcceleratorSource {
    fn discover(&self) -> impl Future<Output = crate::Result<Vec<AcceleratorToken>>> + Send;
}

/// Fixed list of accelerators, used instead of querying the node.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    tokens: Vec<AcceleratorToken>,
}

impl StaticSource {
    pub fn new<S: AsRef<str>>(identifiers: impl IntoIterator<Item = S>) -> Self {
        StaticSource {
            tokens: identifiers
                .into_iter()
                .map(|id| AcceleratorToken::new(id.as_ref()))
                .collect(),
        }
    }
}

impl AcceleratorSource for StaticSource {
    fn discover(&self) -> impl Future<Output = crate::Result<Vec<AcceleratorToken>>> + Send {
        std::future::ready(Ok(self.tokens.clone()))
    }
}

/// Live discovery that can be replaced by an override list.
pub enum InventorySource<S> {
    Override(StaticSource),
    Live(S),
}

impl<S> InventorySource<S> {
    /// An override, when present, always wins over `live`.
    pub fn new(override_list: Option<&[String]>, live: S) -> Self {
        match override_list {
            Some(identifiers) => InventorySource::Override(StaticSource::new(identifiers)),
            None => InventorySource::Live(live),
        }
    }
}

impl<S: AcceleratorSource + Sync> AcceleratorSource for InventorySource<S> {
    fn discover(&self) -> impl Future<Output = crate::Result<Vec<AcceleratorToken>>> + Send {
        async move {
            match self {
                InventorySource::Override(source) => {
                    log::warn!("Overriding discovered accelerator resources");
                    source.discover().await
                }
                InventorySource::Live(source) => source.discover().await,
            }
        }
    }
}
