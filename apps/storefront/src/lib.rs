//! # Storefront Application
//!
//! View Controller, view model and bootstrap for the storefront.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs          ◄─── You are here (logging & startup)
//! ├── controller.rs   ◄─── Storefront actor + StorefrontHandle callbacks
//! ├── view.rs         ◄─── StorefrontView snapshot (ts-rs exported)
//! ├── config.rs       ◄─── StorefrontConfig ([api], [display])
//! └── error.rs        ◄─── AppError, sanitized UserError
//! ```
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  One task owns Catalog, Cart, categories and modal state.               │
//! │  Everything else talks to it through messages:                          │
//! │                                                                         │
//! │   handle.add_to_cart(p) ──► Action ──► controller ──► watch snapshot    │
//! │   fetch task            ──► Event  ──►     "      ──►       "           │
//! │                                                                         │
//! │  No locks guard storefront state.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod view;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use storefront_client::HttpProductStore;

pub use config::{DisplaySettings, StorefrontConfig};
pub use controller::{Storefront, StorefrontHandle};
pub use error::{AppError, AppResult, ErrorCode, UserError};
pub use view::StorefrontView;

/// Starts a controller backed by the HTTP product store.
pub fn start(config: &StorefrontConfig) -> AppResult<StorefrontHandle> {
    let store = HttpProductStore::new(&config.api)?;
    Ok(Storefront::start(Arc::new(store), config.display.clone()))
}

/// Runs the headless driver.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging (RUST_LOG, default info,storefront=debug)        │
/// │  2. Load Config (defaults → storefront.toml → STOREFRONT_* env)         │
/// │  3. Start Controller (category fetch + load of "all")                   │
/// │  4. Wait for the first load to settle                                   │
/// │  5. Print the snapshot as JSON on stdout, shut down                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> AppResult<()> {
    init_tracing();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting storefront");

    let config = StorefrontConfig::load(None)?;
    info!(base_url = %config.api.base_url, "Configuration loaded");

    let handle = start(&config)?;
    let view = handle.wait_for(|v| !v.loading).await?;

    println!("{}", serde_json::to_string_pretty(&view)?);

    handle.shutdown().await?;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_client=trace` - Trace the HTTP client only
/// - Default: INFO, DEBUG for the storefront crate
///
/// Logs go to stderr so stdout carries only the snapshot.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
