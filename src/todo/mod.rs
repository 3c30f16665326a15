//! # Todo Domain
//!
//! The single resource served by this crate, plus the request bodies
//! accepted by the create and update endpoints.

mod model;
mod request;

pub use model::{timestamp_now, NewTodo, Todo, TodoId};
pub use request::{CreateTodoRequest, TodoPatch};
