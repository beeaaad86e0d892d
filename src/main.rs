//! Vitrine - a catalog server with content-addressed assets.

#![allow(dead_code)]

mod asset;
mod catalog;
mod cli;
mod config;
mod core;
mod logger;
mod render;
mod server;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;
use render::Renderer;
use server::Site;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Serve { .. } => serve(&config),
        Commands::Check => check(&config),
    }
}

/// Run the startup pipeline: asset index, catalog, renderer.
///
/// Any failure here propagates to `main` and the process exits non-zero
/// before the server ever reaches a listening state - no partially
/// built catalog is served.
fn build_site(config: &SiteConfig) -> Result<Site> {
    let (registry, routes) = asset::build(config)?;
    let items = catalog::load(config, &registry)?;
    let renderer = Renderer::new(config)?;

    Ok(Site {
        registry,
        routes,
        items,
        renderer,
    })
}

/// Build everything, then serve until Ctrl+C.
fn serve(config: &SiteConfig) -> Result<()> {
    let site = build_site(config)?;
    let bound = server::bind(config)?;
    bound.run(site)
}

/// Build everything and report, without serving.
fn check(config: &SiteConfig) -> Result<()> {
    let site = build_site(config)?;
    log!(
        "check";
        "ok: {} assets, {} routes, {} records",
        site.registry.len(),
        site.routes.len(),
        site.items.len()
    );
    Ok(())
}
