// Rust guideline compliant 2026-08-05

//! Campus application services.
//!
//! This crate provides the student service consumed by the presentation
//! layer: CRUD orchestration for students and tickets over the core
//! storage engine, input validation including the photo URL probe,
//! ticket listing/filtering, data directory discovery, and a
//! standardized error envelope.

pub mod context;
pub mod error;
pub mod list;
pub mod probe;
pub mod service;

pub use context::DataContext;
pub use error::{AppError, ErrorCode, Result};
pub use list::{flatten_tickets, list_tickets, TicketListOptions, TicketWithOwner};
pub use service::StudentService;
