//! Response payload builders
//!
//! One function per route shape. Each takes the instance identity and returns
//! the JSON object for that route; none of them can fail.

use rand::Rng;
use serde_json::{json, Map, Value};

use crate::identity::Identity;

/// Insertion-ordered JSON object returned by a route
pub type ResponsePayload = Map<String, Value>;

pub const GREETING: &str = "Hello from Flask Backend!";
pub const STATUS_RUNNING: &str = "running";
pub const STATUS_HEALTHY: &str = "healthy";
pub const STATIC_VERSION: &str = "1.0.0";
pub const SSL_PROTOCOL: &str = "HTTPS via nginx SSL Termination";

/// Fixed sequence served by every data route
pub const DATA_SEQUENCE: [u32; 5] = [1, 2, 3, 4, 5];

/// Inclusive range of `random` on `/api/data`
pub const DATA_RANDOM_MAX: u32 = 1000;
/// Inclusive range of `random` on `/api/uncached`
pub const UNCACHED_RANDOM_MAX: u32 = 10_000;

fn object(value: Value) -> ResponsePayload {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Unix time in seconds with microsecond resolution
#[allow(clippy::cast_precision_loss)]
pub fn unix_timestamp() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

fn random_up_to(max: u32) -> u32 {
    rand::thread_rng().gen_range(1..=max)
}

// ----- `/` and `/api/` -----

pub fn home_reverse_proxy(identity: &Identity) -> ResponsePayload {
    object(json!({
        "message": GREETING,
        "server": identity.server_id,
        "status": STATUS_RUNNING,
    }))
}

pub fn home_load_balancer(identity: &Identity) -> ResponsePayload {
    object(json!({
        "message": GREETING,
        "server_id": identity.server_id,
        "port": identity.port,
        "status": STATUS_RUNNING,
    }))
}

pub fn home_ssl_termination(_identity: &Identity) -> ResponsePayload {
    object(json!({
        "message": GREETING,
        "protocol": SSL_PROTOCOL,
        "status": STATUS_RUNNING,
    }))
}

pub fn home_caching(_identity: &Identity) -> ResponsePayload {
    object(json!({
        "message": GREETING,
        "timestamp": unix_timestamp(),
        "uncached": "This response is not cached",
    }))
}

pub fn home_compose(identity: &Identity) -> ResponsePayload {
    object(json!({
        "message": GREETING,
        "hostname": identity.hostname,
        "port": identity.port,
        "status": STATUS_RUNNING,
    }))
}

pub fn home_all(identity: &Identity) -> ResponsePayload {
    object(json!({
        "message": GREETING,
        "server_id": identity.server_id,
        "hostname": identity.hostname,
        "port": identity.port,
        "status": STATUS_RUNNING,
    }))
}

// ----- `/api/data` -----

pub fn data_plain(_identity: &Identity) -> ResponsePayload {
    object(json!({
        "data": DATA_SEQUENCE,
        "count": DATA_SEQUENCE.len(),
    }))
}

pub fn data_by_server_id(identity: &Identity) -> ResponsePayload {
    object(json!({
        "data": DATA_SEQUENCE,
        "count": DATA_SEQUENCE.len(),
        "server": identity.server_id,
    }))
}

pub fn data_by_hostname(identity: &Identity) -> ResponsePayload {
    object(json!({
        "data": DATA_SEQUENCE,
        "count": DATA_SEQUENCE.len(),
        "server": identity.hostname,
    }))
}

pub fn data_jittered(_identity: &Identity) -> ResponsePayload {
    object(json!({
        "data": DATA_SEQUENCE,
        "count": DATA_SEQUENCE.len(),
        "timestamp": unix_timestamp(),
        "random": random_up_to(DATA_RANDOM_MAX),
    }))
}

pub fn data_all(identity: &Identity) -> ResponsePayload {
    object(json!({
        "data": DATA_SEQUENCE,
        "count": DATA_SEQUENCE.len(),
        "server": identity.server_id,
        "timestamp": unix_timestamp(),
        "random": random_up_to(DATA_RANDOM_MAX),
    }))
}

// ----- `/api/health` -----

pub fn health_plain(_identity: &Identity) -> ResponsePayload {
    object(json!({ "status": STATUS_HEALTHY }))
}

pub fn health_by_server_id(identity: &Identity) -> ResponsePayload {
    object(json!({
        "status": STATUS_HEALTHY,
        "server": identity.server_id,
    }))
}

pub fn health_by_hostname(identity: &Identity) -> ResponsePayload {
    object(json!({
        "status": STATUS_HEALTHY,
        "server": identity.hostname,
    }))
}

// ----- caching demo -----

pub fn static_content(_identity: &Identity) -> ResponsePayload {
    object(json!({
        "message": "This content rarely changes",
        "version": STATIC_VERSION,
        "timestamp": unix_timestamp(),
    }))
}

pub fn uncached(_identity: &Identity) -> ResponsePayload {
    object(json!({
        "message": "This should never be cached",
        "timestamp": unix_timestamp(),
        "random": random_up_to(UNCACHED_RANDOM_MAX),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            server_id: "server-5001".to_string(),
            hostname: "box".to_string(),
            port: 5001,
        }
    }

    #[test]
    fn test_load_balancer_home_matches_tutorial_output() {
        let body = serde_json::to_string(&home_load_balancer(&identity())).unwrap();
        assert_eq!(
            body,
            r#"{"message":"Hello from Flask Backend!","server_id":"server-5001","port":5001,"status":"running"}"#
        );
    }

    #[test]
    fn test_data_sequence_is_fixed() {
        let id = identity();
        let handlers: [fn(&Identity) -> ResponsePayload; 5] =
            [data_plain, data_by_server_id, data_by_hostname, data_jittered, data_all];
        for handler in handlers {
            let payload = handler(&id);
            assert_eq!(payload["data"], json!([1, 2, 3, 4, 5]));
            assert_eq!(payload["count"], json!(5));
        }
    }

    #[test]
    fn test_data_server_field() {
        let id = identity();
        assert_eq!(data_by_server_id(&id)["server"], "server-5001");
        assert_eq!(data_by_hostname(&id)["server"], "box");
        assert!(data_plain(&id).get("server").is_none());
    }

    #[test]
    fn test_random_stays_in_range() {
        let id = identity();
        for _ in 0..200 {
            let r = data_jittered(&id)["random"].as_u64().unwrap();
            assert!((1..=u64::from(DATA_RANDOM_MAX)).contains(&r));
            let r = uncached(&id)["random"].as_u64().unwrap();
            assert!((1..=u64::from(UNCACHED_RANDOM_MAX)).contains(&r));
        }
    }

    #[test]
    fn test_uncached_random_varies() {
        let id = identity();
        let differing = (0..100)
            .filter(|_| uncached(&id)["random"] != uncached(&id)["random"])
            .count();
        assert!(differing > 90, "only {differing}/100 pairs differed");
    }

    #[test]
    fn test_static_version_constant_and_timestamp_monotonic() {
        let id = identity();
        let first = static_content(&id);
        let second = static_content(&id);
        assert_eq!(first["version"], second["version"]);
        assert_eq!(first["version"], STATIC_VERSION);
        let t1 = first["timestamp"].as_f64().unwrap();
        let t2 = second["timestamp"].as_f64().unwrap();
        assert!(t2 >= t1);
    }

    #[test]
    fn test_health_payloads() {
        let id = identity();
        assert_eq!(health_plain(&id)["status"], STATUS_HEALTHY);
        assert_eq!(health_by_server_id(&id)["server"], "server-5001");
        assert_eq!(health_by_hostname(&id)["server"], "box");
    }

    #[test]
    fn test_home_field_sets() {
        let id = identity();
        let keys = |p: ResponsePayload| p.keys().cloned().collect::<Vec<_>>();
        assert_eq!(keys(home_reverse_proxy(&id)), ["message", "server", "status"]);
        assert_eq!(keys(home_ssl_termination(&id)), ["message", "protocol", "status"]);
        assert_eq!(keys(home_caching(&id)), ["message", "timestamp", "uncached"]);
        assert_eq!(keys(home_compose(&id)), ["message", "hostname", "port", "status"]);
        assert_eq!(
            keys(home_all(&id)),
            ["message", "server_id", "hostname", "port", "status"]
        );
    }
}
