pub mod dto;
pub mod filter;
pub mod handlers;
pub mod model;
pub mod store;
pub mod wizard;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::read_routes())
        .merge(handlers::write_routes())
}
