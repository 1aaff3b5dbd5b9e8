//! Append-only store of captured routes.
//!
//! Registration normally completes before the first document is generated.
//! Hosts that keep registering routes while serving are still safe: readers
//! take a copy-on-read [`RouteSnapshot`] and never observe a partial insert.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::route::{RouteDescriptor, RouteKey, RouteOptions};

/// Deduplicated, ordered store of route descriptors.
///
/// A second registration of an existing (method, URL) pair is discarded.
/// Iteration order is registration order.
///
/// # Example
///
/// ```rust
/// use routedoc_core::{HttpMethod, RouteDescriptor, RouteRegistry};
///
/// let registry = RouteRegistry::new();
/// registry.register(RouteDescriptor::new(HttpMethod::Get, "/users"));
/// registry.register(RouteDescriptor::new(HttpMethod::Get, "/users"));
///
/// assert_eq!(registry.len(), 1);
/// assert_eq!(registry.version(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RouteRegistry {
    routes: RwLock<IndexMap<RouteKey, Arc<RouteDescriptor>>>,
    version: AtomicU64,
}

impl RouteRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a descriptor unless one with the same method and URL exists.
    pub fn register(&self, descriptor: RouteDescriptor) {
        let key = descriptor.key();
        let mut routes = self.routes.write();

        if routes.contains_key(&key) {
            debug!(route = %key, "Discarding duplicate route registration");
            return;
        }

        debug!(
            http.method = %key.method,
            route.url = %key.url,
            has_schema = descriptor.schema().is_some(),
            "Route registered"
        );
        routes.insert(key, Arc::new(descriptor));
        self.version.fetch_add(1, Ordering::AcqRel);
        routedoc_telemetry::metrics::record_route_registered();
    }

    /// Consume a registration event from the host.
    ///
    /// Produces one descriptor per documented method; unknown methods are ignored.
    pub fn on_route(&self, options: RouteOptions) {
        for descriptor in options.into_descriptors() {
            self.register(descriptor);
        }
    }

    /// Whether a route with this key has been registered.
    #[must_use]
    pub fn contains(&self, key: &RouteKey) -> bool {
        self.routes.read().contains_key(key)
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.read().len()
    }

    /// Whether no routes have been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.read().is_empty()
    }

    /// Monotonic counter bumped on every accepted registration.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Copy the current descriptors in registration order.
    #[must_use]
    pub fn snapshot(&self) -> RouteSnapshot {
        let routes = self.routes.read();
        RouteSnapshot {
            version: self.version.load(Ordering::Acquire),
            routes: routes.values().cloned().collect(),
        }
    }
}

/// Point-in-time copy of the registry contents.
#[derive(Debug, Clone, Default)]
pub struct RouteSnapshot {
    version: u64,
    routes: Vec<Arc<RouteDescriptor>>,
}

impl RouteSnapshot {
    /// Build a snapshot from descriptors directly, bypassing a registry.
    #[must_use]
    pub fn from_descriptors(routes: impl IntoIterator<Item = RouteDescriptor>) -> Self {
        Self {
            version: 0,
            routes: routes.into_iter().map(Arc::new).collect(),
        }
    }

    /// Registry version the snapshot was taken at.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterate descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter().map(AsRef::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::HttpMethod;
    use crate::schema::RouteSchema;
    use std::thread;

    #[test]
    fn test_register_dedups() {
        let registry = RouteRegistry::new();
        registry.register(RouteDescriptor::new(HttpMethod::Get, "/a"));
        registry.register(
            RouteDescriptor::new(HttpMethod::Get, "/a").with_schema(RouteSchema::new().tag("x")),
        );

        assert_eq!(registry.len(), 1);
        let snapshot = registry.snapshot();
        let first = snapshot.iter().next().unwrap();
        assert!(first.schema().is_none(), "first registration wins");
    }

    #[test]
    fn test_same_url_different_methods() {
        let registry = RouteRegistry::new();
        registry.register(RouteDescriptor::new(HttpMethod::Get, "/a"));
        registry.register(RouteDescriptor::new(HttpMethod::Post, "/a"));
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(&RouteKey {
            method: HttpMethod::Post,
            url: "/a".to_string(),
        }));
    }

    #[test]
    fn test_snapshot_preserves_order() {
        let registry = RouteRegistry::new();
        for url in ["/c", "/a", "/b"] {
            registry.register(RouteDescriptor::new(HttpMethod::Get, url));
        }

        let urls: Vec<_> = registry.snapshot().iter().map(|d| d.url().to_string()).collect();
        assert_eq!(urls, vec!["/c", "/a", "/b"]);
    }

    #[test]
    fn test_version_only_bumps_on_insert() {
        let registry = RouteRegistry::new();
        assert_eq!(registry.version(), 0);
        registry.register(RouteDescriptor::new(HttpMethod::Get, "/a"));
        registry.register(RouteDescriptor::new(HttpMethod::Get, "/a"));
        assert_eq!(registry.version(), 1);
        assert_eq!(registry.snapshot().version(), 1);
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_inserts() {
        let registry = RouteRegistry::new();
        registry.register(RouteDescriptor::new(HttpMethod::Get, "/a"));
        let snapshot = registry.snapshot();
        registry.register(RouteDescriptor::new(HttpMethod::Get, "/b"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.snapshot().len(), 2);
    }

    #[test]
    fn test_on_route_expands_methods() {
        let registry = RouteRegistry::new();
        registry.on_route(RouteOptions::new(["GET", "PUT", "HEAD"], "/items/:id"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_concurrent_registration() {
        let registry = Arc::new(RouteRegistry::new());
        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for i in 0..50 {
                        registry.register(RouteDescriptor::new(
                            HttpMethod::Get,
                            format!("/w{}/{}", worker % 2, i),
                        ));
                        let _ = registry.snapshot().len();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 100);
        assert_eq!(registry.version(), 100);
    }

    #[test]
    fn test_snapshot_from_descriptors() {
        let snapshot = RouteSnapshot::from_descriptors([
            RouteDescriptor::new(HttpMethod::Get, "/a"),
            RouteDescriptor::new(HttpMethod::Get, "/a"),
        ]);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.version(), 0);
    }
}
