//! Shared application state — injected into every handler via `axum::extract::State`.

use crate::{config::Config, db::Db};

/// Cloned per request by axum. `MySqlPool` is an `Arc`-backed handle and
/// `Config` holds only small strings, so the clone is cheap.
#[derive(Clone)]
pub struct AppState {
    pub pool:   Db,
    pub config: Config,
}
