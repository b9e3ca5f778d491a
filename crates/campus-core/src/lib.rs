// Rust guideline compliant 2026-08-05

//! Campus Core Library
//!
//! This crate provides the foundational components for the campus
//! student register:
//! - Data models (Student, Ticket, Classification)
//! - Storage engine (JSONL read/write, locking, atomic saves)
//! - Hash ID generation and format validation
//! - Configuration management
//! - Error types and result handling

pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
pub use models::{Classification, NewStudent, Student, Ticket};
pub use storage::Storage;
