//! In-memory memoization of "leave now" route lookups.
//!
//! Entries live for the lifetime of the process; there is no invalidation.
//! Lookups with an explicit departure time always go to the inner provider.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{DepartureTime, DirectionsProvider, ProviderError, RawRoute, RouteQuery};
use crate::models::TravelMode;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    origin: String,
    destination: String,
    mode: TravelMode,
    alternatives: bool,
}

impl CacheKey {
    fn for_query(query: &RouteQuery) -> Option<Self> {
        match query.departure {
            DepartureTime::Now => Some(Self {
                origin: query.origin.clone(),
                destination: query.destination.clone(),
                mode: query.mode,
                alternatives: query.alternatives,
            }),
            DepartureTime::At(_) => None,
        }
    }
}

/// Wraps a provider and remembers successful "now" lookups.
pub struct CachedProvider<P> {
    inner: P,
    routes: RwLock<HashMap<CacheKey, Vec<RawRoute>>>,
}

impl<P: DirectionsProvider> CachedProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            routes: RwLock::new(HashMap::new()),
        }
    }

    /// Number of memoized lookups.
    pub async fn len(&self) -> usize {
        self.routes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.routes.read().await.is_empty()
    }
}

#[async_trait]
impl<P: DirectionsProvider> DirectionsProvider for CachedProvider<P> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn get_routes(&self, query: &RouteQuery) -> Result<Vec<RawRoute>, ProviderError> {
        let Some(key) = CacheKey::for_query(query) else {
            return self.inner.get_routes(query).await;
        };

        if let Some(routes) = self.routes.read().await.get(&key) {
            debug!("[CACHE HIT] {} → {} ({})", key.origin, key.destination, key.mode);
            return Ok(routes.clone());
        }

        let routes = self.inner.get_routes(query).await?;
        self.routes.write().await.insert(key, routes.clone());
        Ok(routes)
    }
}
