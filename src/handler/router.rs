//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, health probes,
//! page lookup by path, and access logging.

use crate::config::{AppState, HealthConfig};
use crate::dashboard::template::normalize_route_path;
use crate::handler::page;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method();
    let uri = req.uri();

    let ctx = RequestContext {
        path: normalize_route_path(uri.path()),
        query: uri.query(),
        is_head: *method == Method::HEAD,
        if_none_match: header_value(&req, "if-none-match"),
    };

    let (response, location) = match check_http_method(method, state.config.http.enable_cors) {
        Some(resp) => (resp, None),
        None => route_request(&ctx, &state).await,
    };

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            uri.path().to_string(),
        );
        entry.query = uri.query().map(ToString::to_string);
        entry.http_version = http_version(&req).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.referer = header_value(&req, "referer");
        entry.user_agent = header_value(&req, "user-agent");
        entry.location = location;
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Route request by path. Returns the resolved location for page requests.
async fn route_request(
    ctx: &RequestContext<'_>,
    state: &Arc<AppState>,
) -> (Response<Full<Bytes>>, Option<String>) {
    // Health checks first, they never touch the fragment store
    if let Some(resp) = health_response(ctx.path, &state.config.health) {
        return (resp, None);
    }

    match state.template_for(ctx.path) {
        Some(template) => {
            let (resp, key) = page::serve_page(ctx, template, state).await;
            (resp, Some(key.to_string()))
        }
        None => (http::build_404_response(), None),
    }
}

fn health_response(path: &str, health: &HealthConfig) -> Option<Response<Full<Bytes>>> {
    if health.enabled && (path == health.liveness_path || path == health.readiness_path) {
        Some(http::build_health_response("ok"))
    } else {
        None
    }
}

fn header_value<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn http_version<B>(req: &Request<B>) -> &'static str {
    match req.version() {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    }
}
