//! # storefront-client: Product Store Client
//!
//! Read-only access to the remote catalog API.
//!
//! ## Module Structure
//! ```text
//! storefront_client/
//! ├── store.rs   ← ProductStore trait (the seam the controller depends on)
//! ├── http.rs    ← HttpProductStore (reqwest)
//! ├── config.rs  ← ClientConfig ([api] table)
//! └── error.rs   ← ClientError
//! ```
//!
//! ## Data Flow
//! ```text
//! ┌──────────────┐  list_products(filter)  ┌──────────────────┐   GET   ┌─────────┐
//! │  Controller  │ ──────────────────────► │ HttpProductStore │ ──────► │   API   │
//! │              │ ◄────────────────────── │                  │ ◄────── │         │
//! └──────────────┘  Result<Vec<Product>>   └──────────────────┘  JSON   └─────────┘
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod store;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ClientError, ClientResult};
pub use http::HttpProductStore;
pub use store::ProductStore;
