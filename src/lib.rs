//! todo-api - A minimal HTTP CRUD service for todos backed by MongoDB
//!
//! Request flow: router → todo handler → connection provider → store,
//! answered with a uniform JSON envelope.

pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod store;
pub mod todo;
