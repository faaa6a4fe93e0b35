//! HTTP server for the Headliner daemon.
//!
//! Provides:
//! - Title generation (`POST /generate-titles`)
//! - CORS preflight for browser callers
//! - Health checks

mod http;
pub mod state;

pub use http::create_router;
pub use state::AppState;
