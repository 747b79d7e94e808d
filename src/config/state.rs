// Application state module
// Everything a request handler reads; built once, never mutated

use super::types::Config;
use crate::identity::Identity;
use crate::routing::RouteTable;

/// Application state
///
/// Shared across connection tasks behind an `Arc`. Nothing in here is
/// mutable, so concurrent reads need no synchronisation.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub identity: Identity,
    pub routes: RouteTable,
}

impl AppState {
    /// Build state for a resolved identity, deriving the route table from the
    /// configured variant
    pub fn new(config: Config, identity: Identity) -> Self {
        let routes = RouteTable::for_variant(config.identity.variant, config.data_delay());
        Self {
            config,
            identity,
            routes,
        }
    }
}
