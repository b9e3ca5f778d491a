// Rust guideline compliant 2026-08-05

//! Hash-based identifier generation for Students and Tickets.
//!
//! Identifiers are assigned by the storage engine at creation time:
//! a SHA-256 digest of the record's fields, creation timestamp and a
//! collision nonce, truncated to a short hex suffix behind a type prefix
//! (`stu-` for Students, `tkt-` for Tickets).

use crate::{Error, Result};
use sha2::{Digest, Sha256};

/// Prefix for Student identifiers.
pub const STUDENT_PREFIX: &str = "stu-";

/// Prefix for Ticket identifiers.
pub const TICKET_PREFIX: &str = "tkt-";

/// Generates a Student identifier.
///
/// # Arguments
///
/// * `name` - Student name
/// * `email` - Student email
/// * `timestamp` - Creation timestamp (Unix seconds)
/// * `nonce` - Collision nonce
///
/// # Returns
///
/// A Student ID of the form `stu-XXXXXX`.
pub fn student_id(name: &str, email: &str, timestamp: i64, nonce: u32) -> String {
    hash_id(STUDENT_PREFIX, &[name.as_bytes(), email.as_bytes()], timestamp, nonce)
}

/// Generates a Ticket identifier.
///
/// # Arguments
///
/// * `student_id` - Owning Student ID
/// * `issue` - Ticket issue text
/// * `timestamp` - Creation timestamp (Unix seconds)
/// * `nonce` - Collision nonce
///
/// # Returns
///
/// A Ticket ID of the form `tkt-XXXXXX`.
pub fn ticket_id(student_id: &str, issue: &str, timestamp: i64, nonce: u32) -> String {
    hash_id(TICKET_PREFIX, &[student_id.as_bytes(), issue.as_bytes()], timestamp, nonce)
}

/// Validates a Student ID format.
///
/// # Arguments
///
/// * `id` - The ID to validate
///
/// # Returns
///
/// Ok if the ID is a well-formed Student ID.
///
/// # Errors
///
/// Returns `Error::InvalidStudent` if the format is wrong.
pub fn validate_student_id(id: &str) -> Result<()> {
    validate_id(id, STUDENT_PREFIX).map_err(Error::InvalidStudent)
}

/// Validates a Ticket ID format.
///
/// # Arguments
///
/// * `id` - The ID to validate
///
/// # Returns
///
/// Ok if the ID is a well-formed Ticket ID.
///
/// # Errors
///
/// Returns `Error::InvalidTicket` if the format is wrong.
pub fn validate_ticket_id(id: &str) -> Result<()> {
    validate_id(id, TICKET_PREFIX).map_err(Error::InvalidTicket)
}

fn validate_id(id: &str, prefix: &str) -> std::result::Result<(), String> {
    let suffix = match id.strip_prefix(prefix) {
        Some(suffix) => suffix,
        None => {
            return Err(format!("ID must start with '{}', got '{}'", prefix, id));
        }
    };

    if suffix.len() < 6 || suffix.len() > 8 {
        return Err(format!("ID suffix must be 6-8 hex chars, got '{}'", id));
    }

    if !suffix.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()) {
        return Err(format!("ID suffix must be lowercase hex, got '{}'", id));
    }

    Ok(())
}

fn hash_id(prefix: &str, parts: &[&[u8]], timestamp: i64, nonce: u32) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.update(timestamp.to_le_bytes());
    hasher.update(nonce.to_le_bytes());

    let hash = hasher.finalize();
    let hex = format!("{:x}", hash);
    format!("{}{}", prefix, &hex[..6])
}
