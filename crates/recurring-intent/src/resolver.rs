//! Name-service resolution seam.
//!
//! The planner only depends on [`NameResolver`]; network-backed resolvers live outside
//! this crate.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;

use crate::errors::ResolveError;

/// Resolves a name-service identifier (e.g. `alice.eth`) to an address string.
///
/// `Ok(None)` means the name has no record. The returned string is validated by the
/// caller, so backends can pass through whatever the upstream service answered.
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn resolve(&self, name: &str) -> Result<Option<String>, ResolveError>;
}

#[async_trait]
impl<T: NameResolver + ?Sized> NameResolver for Arc<T> {
    async fn resolve(&self, name: &str) -> Result<Option<String>, ResolveError> {
        (**self).resolve(name).await
    }
}

/// Resolves nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullResolver;

#[async_trait]
impl NameResolver for NullResolver {
    async fn resolve(&self, _name: &str) -> Result<Option<String>, ResolveError> {
        Ok(None)
    }
}

/// Fixed in-memory name table. Lookups are case-insensitive.
#[derive(Clone, Debug, Default)]
pub struct StaticResolver {
    records: HashMap<String, String>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, name: &str, address: impl Into<String>) -> Self {
        self.insert(name, address);
        self
    }

    pub fn insert(&mut self, name: &str, address: impl Into<String>) {
        self.records.insert(name.to_ascii_lowercase(), address.into());
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<N: AsRef<str>, A: Into<String>> FromIterator<(N, A)> for StaticResolver {
    fn from_iter<I: IntoIterator<Item = (N, A)>>(iter: I) -> Self {
        let mut resolver = Self::new();
        for (name, address) in iter {
            resolver.insert(name.as_ref(), address);
        }
        resolver
    }
}

#[async_trait]
impl NameResolver for StaticResolver {
    async fn resolve(&self, name: &str) -> Result<Option<String>, ResolveError> {
        Ok(self.records.get(&name.to_ascii_lowercase()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_resolver_is_case_insensitive() {
        let resolver = StaticResolver::new()
            .with_record("Alice.eth", "0x1111111111111111111111111111111111111111");
        assert_eq!(
            resolver.resolve("ALICE.ETH").await.unwrap().as_deref(),
            Some("0x1111111111111111111111111111111111111111")
        );
        assert_eq!(resolver.resolve("bob.eth").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_null_resolver_and_arc_forwarding() {
        let resolver: Arc<dyn NameResolver> = Arc::new(NullResolver);
        assert_eq!(resolver.resolve("alice.eth").await.unwrap(), None);
    }

    #[test]
    fn test_from_iterator() {
        let resolver: StaticResolver = [("a.eth", "0x01"), ("b.eth", "0x02")].into_iter().collect();
        assert_eq!(resolver.len(), 2);
        assert!(!resolver.is_empty());
    }
}
