//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation,
//! route lookup, latency injection and access logging.

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main entry point for HTTP request handling
///
/// The request body is never read.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method();
    let path = req.uri().path();

    let response = respond_within_deadline(method, path, &state).await;

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            path.to_string(),
            state.identity.server_id.clone(),
        );
        entry.query = req.uri().query().map(ToString::to_string);
        entry.http_version = version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = usize::try_from(response.body().size_hint().exact().unwrap_or(0))
            .unwrap_or(usize::MAX);
        entry.referer = header_value(&req, "referer");
        entry.user_agent = header_value(&req, "user-agent");
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Run `dispatch` bounded by `performance.write_timeout` seconds, 0 meaning no bound
async fn respond_within_deadline(
    method: &Method,
    path: &str,
    state: &AppState,
) -> Response<Full<Bytes>> {
    let deadline = Duration::from_secs(state.config.performance.write_timeout);
    if deadline.is_zero() {
        return dispatch(method, path, state).await;
    }
    match tokio::time::timeout(deadline, dispatch(method, path, state)).await {
        Ok(response) => response,
        Err(_) => {
            logger::log_warning(&format!(
                "{method} {path} not answered within {} seconds",
                deadline.as_secs()
            ));
            http::build_503_response()
        }
    }
}

/// Check method, find the route, wait out its delay and build the response
async fn dispatch(method: &Method, path: &str, state: &AppState) -> Response<Full<Bytes>> {
    let is_head = match *method {
        Method::GET => false,
        Method::HEAD => true,
        Method::OPTIONS => return http::build_options_response(),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method} {path}"));
            return http::build_405_response();
        }
    };

    let Some(entry) = state.routes.find(path) else {
        return http::build_404_response();
    };

    // Suspends this request's task only
    if let Some(delay) = entry.delay {
        tokio::time::sleep(delay).await;
    }

    let payload = (entry.handler)(&state.identity);
    let cache = state.config.http.cache_headers.then_some(entry.cache);
    http::build_json_response(&payload, cache, &state.config.http.server_name, is_head)
}

fn header_value<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn version_label(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
