//! HTTP surface of the attendance service.
//!
//! Routes:
//! - `GET /api/eventos?start&end`: normalized attendance for a date range
//! - `GET /api/hik-users`: the device's enrolled users
//! - `GET`/`POST /api/schedules` and `/api/employees`: stored documents
//!
//! Every other path is served from the static `public` directory.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, Result};
pub use router::{create_router, serve};
pub use state::AppState;
