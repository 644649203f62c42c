use axum::Router;

use crate::Config;

mod diagnostics;
mod health;
mod maintenance;

// ---

pub fn router(config: Config) -> Router {
    // ---
    Router::new()
        .merge(diagnostics::router())
        .merge(maintenance::router())
        .merge(health::router())
        .with_state(config)
}
