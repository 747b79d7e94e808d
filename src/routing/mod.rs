//! Routing module
//!
//! The route table is built once per process from the configured variant and
//! is read-only afterwards. Lookups are exact path matches in insertion order.

pub mod payload;

use std::time::Duration;

use crate::config::Variant;
use crate::http::CachePolicy;
use crate::identity::Identity;

pub use payload::ResponsePayload;

/// Builds the JSON body for a route
pub type Handler = fn(&Identity) -> ResponsePayload;

pub const ROOT: &str = "/";
pub const API_ROOT: &str = "/api/";
pub const DATA: &str = "/api/data";
pub const HEALTH: &str = "/api/health";
pub const STATIC: &str = "/api/static";
pub const UNCACHED: &str = "/api/uncached";

const GREETING_CACHE: CachePolicy = CachePolicy::Public(60);
const DATA_CACHE: CachePolicy = CachePolicy::Public(30);
const STATIC_CACHE: CachePolicy = CachePolicy::Public(3600);

/// A single endpoint
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub path: &'static str,
    pub handler: Handler,
    pub cache: CachePolicy,
    /// Artificial processing time before the handler runs
    pub delay: Option<Duration>,
}

/// Ordered, immutable set of endpoints
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Build the table for a variant
    ///
    /// `data_delay` applies to `/api/data` only.
    pub fn for_variant(variant: Variant, data_delay: Option<Duration>) -> Self {
        use payload as p;

        let table = Self::default();
        match variant {
            Variant::ReverseProxy => table
                .route(ROOT, p::home_reverse_proxy, GREETING_CACHE)
                .route(API_ROOT, p::home_reverse_proxy, GREETING_CACHE)
                .delayed(DATA, p::data_plain, DATA_CACHE, data_delay)
                .route(HEALTH, p::health_plain, CachePolicy::NoStore),
            Variant::LoadBalancer => table
                .route(ROOT, p::home_load_balancer, GREETING_CACHE)
                .delayed(DATA, p::data_by_server_id, DATA_CACHE, data_delay)
                .route(HEALTH, p::health_by_server_id, CachePolicy::NoStore),
            Variant::SslTermination => table
                .route(ROOT, p::home_ssl_termination, GREETING_CACHE)
                .delayed(DATA, p::data_plain, DATA_CACHE, data_delay)
                .route(HEALTH, p::health_plain, CachePolicy::NoStore),
            Variant::Caching => table
                .route(ROOT, p::home_caching, GREETING_CACHE)
                .delayed(DATA, p::data_jittered, DATA_CACHE, data_delay)
                .route(STATIC, p::static_content, STATIC_CACHE)
                .route(UNCACHED, p::uncached, CachePolicy::NoStore)
                .route(HEALTH, p::health_plain, CachePolicy::NoStore),
            Variant::Compose => table
                .route(ROOT, p::home_compose, GREETING_CACHE)
                .delayed(DATA, p::data_by_hostname, DATA_CACHE, data_delay)
                .route(HEALTH, p::health_by_hostname, CachePolicy::NoStore),
            Variant::All => table
                .route(ROOT, p::home_all, GREETING_CACHE)
                .route(API_ROOT, p::home_all, GREETING_CACHE)
                .delayed(DATA, p::data_all, DATA_CACHE, data_delay)
                .route(HEALTH, p::health_by_server_id, CachePolicy::NoStore)
                .route(STATIC, p::static_content, STATIC_CACHE)
                .route(UNCACHED, p::uncached, CachePolicy::NoStore),
        }
    }

    fn route(self, path: &'static str, handler: Handler, cache: CachePolicy) -> Self {
        self.delayed(path, handler, cache, None)
    }

    fn delayed(
        mut self,
        path: &'static str,
        handler: Handler,
        cache: CachePolicy,
        delay: Option<Duration>,
    ) -> Self {
        debug_assert!(self.find(path).is_none(), "duplicate route {path}");
        self.entries.push(RouteEntry {
            path,
            handler,
            cache,
            delay,
        });
        self
    }

    /// Exact-match lookup
    pub fn find(&self, path: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.path == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARIANTS: [Variant; 6] = [
        Variant::ReverseProxy,
        Variant::LoadBalancer,
        Variant::SslTermination,
        Variant::Caching,
        Variant::Compose,
        Variant::All,
    ];

    fn paths(table: &RouteTable) -> Vec<&'static str> {
        table.iter().map(|entry| entry.path).collect()
    }

    #[test]
    fn test_every_variant_serves_health() {
        let id = Identity {
            server_id: "server-5000".to_string(),
            hostname: "localhost".to_string(),
            port: 5000,
        };
        for variant in VARIANTS {
            let table = RouteTable::for_variant(variant, None);
            let entry = table.find(HEALTH).expect("health route");
            assert_eq!((entry.handler)(&id)["status"], "healthy");
            assert_eq!(entry.cache, CachePolicy::NoStore);
        }
    }

    #[test]
    fn test_route_sets() {
        let table = RouteTable::for_variant(Variant::ReverseProxy, None);
        assert_eq!(paths(&table), [ROOT, API_ROOT, DATA, HEALTH]);

        let table = RouteTable::for_variant(Variant::LoadBalancer, None);
        assert_eq!(paths(&table), [ROOT, DATA, HEALTH]);

        let table = RouteTable::for_variant(Variant::Caching, None);
        assert_eq!(paths(&table), [ROOT, DATA, STATIC, UNCACHED, HEALTH]);

        let table = RouteTable::for_variant(Variant::All, None);
        assert_eq!(table.iter().count(), 6);
        assert!(table.find(API_ROOT).is_some());
    }

    #[test]
    fn test_delay_only_on_data() {
        let delay = Some(Duration::from_millis(100));
        let table = RouteTable::for_variant(Variant::Caching, delay);
        for entry in table.iter() {
            if entry.path == DATA {
                assert_eq!(entry.delay, delay);
            } else {
                assert_eq!(entry.delay, None);
            }
        }
    }

    #[test]
    fn test_cache_classification() {
        let table = RouteTable::for_variant(Variant::All, None);
        assert!(table.find(ROOT).unwrap().cache.is_cacheable());
        assert!(table.find(STATIC).unwrap().cache.is_cacheable());
        assert!(!table.find(UNCACHED).unwrap().cache.is_cacheable());
    }

    #[test]
    fn test_find_is_exact() {
        let table = RouteTable::for_variant(Variant::LoadBalancer, None);
        assert!(table.find("/api").is_none());
        assert!(table.find("/api/data/").is_none());
        assert!(table.find(API_ROOT).is_none());
    }
}
