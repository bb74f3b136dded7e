//! # Storefront Entry Point
//!
//! Headless driver: loads the catalog once and prints the view snapshot.
//!
//! ```text
//! $ STOREFRONT_API_BASE_URL=http://localhost:3000 storefront > view.json
//! ```

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    match storefront::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Storefront failed");
            ExitCode::FAILURE
        }
    }
}
