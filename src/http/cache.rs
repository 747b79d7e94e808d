//! HTTP cache control module
//!
//! Maps each route to the `Cache-Control` header an external cache should honour.

/// Cache control policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Public cache with specified max-age (seconds)
    Public(u32),
    /// Never store
    NoStore,
}

impl CachePolicy {
    /// Convert to Cache-Control header value
    pub fn to_header_value(self) -> String {
        match self {
            Self::Public(max_age) => format!("public, max-age={max_age}"),
            Self::NoStore => "no-store".to_string(),
        }
    }

    /// Whether a shared cache may keep the response
    pub const fn is_cacheable(self) -> bool {
        matches!(self, Self::Public(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_policy() {
        assert_eq!(
            CachePolicy::Public(3600).to_header_value(),
            "public, max-age=3600"
        );
        assert_eq!(CachePolicy::NoStore.to_header_value(), "no-store");
    }

    #[test]
    fn test_cacheable() {
        assert!(CachePolicy::Public(60).is_cacheable());
        assert!(!CachePolicy::NoStore.is_cacheable());
    }
}
