//! HTTP response handlers.

use anyhow::{Context, Result};
use std::{fs, path::Path};
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::utils::mime;

/// Cache policy for content-addressed artifacts: the URL changes when
/// the content changes, so clients may cache forever.
const IMMUTABLE_CACHE: &str = "public, max-age=31536000, immutable";

/// Respond with the rendered index page.
pub fn respond_page(request: Request, html: String) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, 200, mime::types::HTML, None);
    }
    send_body(request, 200, mime::types::HTML, html.into_bytes(), None)
}

/// Respond with a content-addressed artifact from its byte source.
pub fn respond_artifact(request: Request, path: &Path) -> Result<()> {
    let content_type = mime::from_path(path);

    if is_head_request(&request) {
        return send_head(request, 200, content_type, Some(IMMUTABLE_CACHE));
    }

    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    send_body(request, 200, content_type, body, Some(IMMUTABLE_CACHE))
}

/// Respond with 404.
pub fn respond_not_found(request: Request) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, 404, mime::types::PLAIN, None);
    }
    send_body(
        request,
        404,
        mime::types::PLAIN,
        b"404 Not Found".to_vec(),
        None,
    )
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(
        request,
        503,
        mime::types::PLAIN,
        b"503 Service Unavailable".to_vec(),
        None,
    )
}

/// Respond with 405 for anything but GET/HEAD.
pub fn respond_method_not_allowed(request: Request) -> Result<()> {
    send_body(
        request,
        405,
        mime::types::PLAIN,
        b"405 Method Not Allowed".to_vec(),
        None,
    )
}

pub fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(
    request: Request,
    status: u16,
    content_type: &'static str,
    cache: Option<&'static str>,
) -> Result<()> {
    let mut response = Response::empty(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    if let Some(cache) = cache {
        response = response.with_header(make_header("Cache-Control", cache));
    }
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
    cache: Option<&'static str>,
) -> Result<()> {
    let mut response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    if let Some(cache) = cache {
        response = response.with_header(make_header("Cache-Control", cache));
    }
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).unwrap()
}
