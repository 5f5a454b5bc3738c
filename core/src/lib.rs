//! Synchronous client core for the todo service.
//!
//! # Overview
//! Three layers, each usable on its own:
//! - `TodoClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network (host-does-IO pattern).
//! - `TodoResource` pairs a client with a `Transport` and exposes one method
//!   per REST call on `/todo/`.
//! - `TodoApp` is the page view-model: it owns the todo list, the creation
//!   draft and the notification queue, and reconciles them with server
//!   answers.
//!
//! # Design
//! - `Status` is an enum inside the client and a boolean on the wire.
//! - Errors carry an `ErrorKind` (validation, not found, transport, server).
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod draft;
pub mod error;
pub mod http;
pub mod notification;
pub mod resource;
pub mod transport;
pub mod types;
pub mod view_model;

pub use client::TodoClient;
pub use config::Config;
pub use draft::TodoDraft;
pub use error::{ApiError, AppError, DraftError, ErrorKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use notification::{Level, Notification};
pub use resource::TodoResource;
pub use transport::{Transport, UreqTransport};
pub use types::{NewTodo, Priority, Status, Todo, TodoId, UpdateStatus};
pub use view_model::{LoadState, TodoApp};
