//! HTTP response building module
//!
//! Provides builders for the handful of responses the fixture sends.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::cache::CachePolicy;

const ALLOW: &str = "GET, HEAD, OPTIONS";

/// Build 200 JSON response
///
/// `cache` is `None` when cache headers are disabled.
pub fn build_json_response<T: Serialize>(
    body: &T,
    cache: Option<CachePolicy>,
    server_name: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let json = match serde_json::to_vec(body) {
        Ok(j) => Bytes::from(j),
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_500_response();
        }
    };
    let content_length = json.len();
    let body = if is_head { Bytes::new() } else { json };

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .header("Content-Length", content_length)
        .header("Server", server_name);
    if let Some(policy) = cache {
        builder = builder.header("Cache-Control", policy.to_header_value());
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", ALLOW)
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(204)
        .header("Allow", ALLOW)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 503 Service Unavailable response, sent when a response misses its deadline
pub fn build_503_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::SERVICE_UNAVAILABLE)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(r#"{"error":"Response deadline exceeded"}"#)))
        .unwrap_or_else(|e| {
            log_build_error("503", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

fn build_500_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(r#"{"error":"Internal server error"}"#)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))))
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_bytes(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_json_response_headers() {
        let payload = serde_json::json!({"status": "healthy"});
        let resp = build_json_response(&payload, Some(CachePolicy::NoStore), "test/1", false);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "application/json");
        assert_eq!(resp.headers()["cache-control"], "no-store");
        assert_eq!(resp.headers()["server"], "test/1");
        assert_eq!(body_bytes(resp).await, Bytes::from(r#"{"status":"healthy"}"#));
    }

    #[tokio::test]
    async fn test_json_response_head_has_no_body() {
        let payload = serde_json::json!({"status": "healthy"});
        let resp = build_json_response(&payload, None, "test/1", true);
        assert!(resp.headers().get("cache-control").is_none());
        assert_eq!(resp.headers()["content-length"], "20");
        assert!(body_bytes(resp).await.is_empty());
    }

    #[test]
    fn test_error_responses() {
        assert_eq!(build_404_response().status(), StatusCode::NOT_FOUND);
        let resp = build_405_response();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["allow"], ALLOW);
        assert_eq!(build_options_response().status(), StatusCode::NO_CONTENT);
        assert_eq!(build_503_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
