mod dto;
pub mod handlers;
mod memory;
mod repo;
mod repo_types;
mod services;

use crate::state::AppState;
use axum::Router;

pub use memory::MemoryStudentStore;
pub use repo::{PgStudentStore, StudentStore};

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::student_routes())
}
