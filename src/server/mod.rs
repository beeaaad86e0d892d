//! HTTP server for the built site.
//!
//! The serving layer owns transport only: method, headers, status
//! codes. Which URLs exist and what they resolve to is dictated by the
//! route table the pipeline produced.

mod response;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tiny_http::{Method, Request, Server};

use crate::asset::{AssetRegistry, RouteTable};
use crate::catalog::CatalogItem;
use crate::core::{self, UrlPath};
use crate::log;
use crate::render::Renderer;

/// Everything built at startup, shared read-only with the worker pool.
///
/// Holding the registry keeps the derivative arena alive for as long as
/// its routes are servable; dropping the site removes the temp files.
pub struct Site {
    pub registry: AssetRegistry,
    pub routes: RouteTable,
    pub items: Vec<CatalogItem>,
    pub renderer: Renderer,
}

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Number of request worker threads.
const WORKERS: usize = 4;

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
}

/// Bind the HTTP server without starting the request loop.
///
/// Registers the server with the global shutdown handler so Ctrl+C can
/// unblock the request loop.
pub fn bind(config: &crate::config::SiteConfig) -> Result<BoundServer> {
    let (server, addr) = bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    core::register_server(Arc::clone(&server));
    log!("serve"; "http://{}", addr);

    Ok(BoundServer { server, addr })
}

/// Bind to the specified interface and port, with automatic port retry.
fn bind_with_retry(interface: std::net::IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < MAX_PORT_RETRIES => continue,
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Failed to bind after {} attempts (ports {}-{}): {}",
                    MAX_PORT_RETRIES,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

impl BoundServer {
    /// Get the bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the request loop (blocking). Returns after Ctrl+C unblocks
    /// the listener; dropping `site` then cleans up the arena.
    pub fn run(self, site: Site) -> Result<()> {
        let site = Arc::new(site);

        // Thread pool so one slow disk read doesn't block other requests
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(WORKERS)
            .build()?;

        for request in self.server.incoming_requests() {
            let site = Arc::clone(&site);
            pool.spawn(move || {
                if let Err(e) = handle_request(request, &site) {
                    log!("serve"; "request error: {e}");
                }
            });
        }
        Ok(())
    }
}

/// Handle a single HTTP request
fn handle_request(request: Request, site: &Site) -> Result<()> {
    // Early exit if shutdown requested
    if core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    if !matches!(request.method(), Method::Get | Method::Head) {
        return response::respond_method_not_allowed(request);
    }

    let url = UrlPath::from_browser(request.url());

    if url == "/" {
        let html = site.renderer.render(&site.items)?;
        return response::respond_page(request, html);
    }

    if let Some(source) = site.routes.resolve(url.as_str()) {
        return response::respond_artifact(request, source);
    }

    response::respond_not_found(request)
}
