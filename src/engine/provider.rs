//! Match providers
//!
//! This module provides the trait the engine uses to fetch suggestions and
//! adapters that turn plain closures into providers. A provider is always
//! asynchronous from the engine's point of view; synchronous lookups are
//! wrapped into futures that resolve on first poll.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;

use crate::error::ProviderError;

/// Result of one provider call
pub type ProviderResult<T> = Result<Vec<T>, ProviderError>;

/// Trait for providing match candidates for a query
#[async_trait]
pub trait MatchProvider<T>: Send + Sync {
    /// Get the candidates for an already normalized query
    async fn matches(&self, query: &str) -> ProviderResult<T>;
}

/// Start a provider call that owns everything it needs
pub(crate) fn request<T>(
    provider: Arc<dyn MatchProvider<T>>,
    query: String,
) -> BoxFuture<'static, ProviderResult<T>>
where
    T: Send + 'static,
{
    async move { provider.matches(&query).await }.boxed()
}

/// Provider backed by a synchronous function
pub struct SyncProvider<F> {
    lookup: F,
}

impl<F> SyncProvider<F> {
    pub fn new(lookup: F) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl<T, F> MatchProvider<T> for SyncProvider<F>
where
    T: Send + 'static,
    F: Fn(&str) -> ProviderResult<T> + Send + Sync,
{
    async fn matches(&self, query: &str) -> ProviderResult<T> {
        (self.lookup)(query)
    }
}

/// Provider backed by a function returning a future
pub struct AsyncFnProvider<F> {
    lookup: F,
}

impl<F> AsyncFnProvider<F> {
    pub fn new(lookup: F) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl<T, F, Fut> MatchProvider<T> for AsyncFnProvider<F>
where
    T: Send + 'static,
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = ProviderResult<T>> + Send + 'static,
{
    async fn matches(&self, query: &str) -> ProviderResult<T> {
        (self.lookup)(query.to_string()).await
    }
}

/// Wrap an infallible synchronous lookup
pub fn from_fn<T, F>(lookup: F) -> SyncProvider<impl Fn(&str) -> ProviderResult<T> + Send + Sync>
where
    F: Fn(&str) -> Vec<T> + Send + Sync,
{
    SyncProvider::new(move |query: &str| Ok(lookup(query)))
}

/// Wrap a fallible synchronous lookup
pub fn try_from_fn<T, F>(lookup: F) -> SyncProvider<F>
where
    F: Fn(&str) -> ProviderResult<T> + Send + Sync,
{
    SyncProvider::new(lookup)
}

/// Wrap an asynchronous lookup
pub fn from_async_fn<T, F, Fut>(lookup: F) -> AsyncFnProvider<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = ProviderResult<T>> + Send + 'static,
{
    AsyncFnProvider::new(lookup)
}

/// Provider filtering a fixed list of items
///
/// Matching is case-insensitive. Items whose text starts with the query come
/// first, followed by items containing it elsewhere; provider order is kept
/// within each group. An empty query matches everything.
pub struct StaticListProvider<T> {
    items: Vec<T>,
    item_text: Arc<dyn Fn(&T) -> String + Send + Sync>,
    latency: Option<Duration>,
}

impl<T> StaticListProvider<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a provider over `items`
    ///
    /// # Arguments
    /// * `items` - Candidate items
    /// * `item_text` - Text each item is matched against
    pub fn new(items: Vec<T>, item_text: Arc<dyn Fn(&T) -> String + Send + Sync>) -> Self {
        Self {
            items,
            item_text,
            latency: None,
        }
    }

    /// Delay every answer, as a remote source would
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency).filter(|d| !d.is_zero());
        self
    }

    fn filter(&self, query: &str) -> Vec<T> {
        let needle = query.to_lowercase();
        let mut prefixed = Vec::new();
        let mut contained = Vec::new();

        for item in &self.items {
            let text = (self.item_text)(item).to_lowercase();
            if text.starts_with(&needle) {
                prefixed.push(item.clone());
            } else if text.contains(&needle) {
                contained.push(item.clone());
            }
        }

        prefixed.extend(contained);
        prefixed
    }
}

impl StaticListProvider<String> {
    /// Provider over plain strings
    pub fn from_strings<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            items.into_iter().map(Into::into).collect(),
            Arc::new(|s: &String| s.clone()),
        )
    }
}

#[async_trait]
impl<T> MatchProvider<T> for StaticListProvider<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn matches(&self, query: &str) -> ProviderResult<T> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        Ok(self.filter(query))
    }
}
