//! # Todo HTTP Server Module
//!
//! Axum server exposing the todo resource.
//!
//! # Endpoints
//!
//! - `GET /` - Service description
//! - `GET /todos` - List all todos
//! - `GET /todos/:id` - Get one todo
//! - `POST /todos` - Create a todo
//! - `PUT /todos/:id` - Partially update a todo
//! - `DELETE /todos/:id` - Delete a todo
//! - `OPTIONS *` - Preflight, empty 200

pub mod config;
pub mod envelope;
pub mod errors;
pub mod handlers;
pub mod router;
pub mod server;

pub use config::HttpServerConfig;
pub use envelope::Envelope;
pub use errors::{ApiError, ApiResult};
pub use handlers::TodoState;
pub use router::{build_router, todo_routes};
pub use server::TodoServer;
