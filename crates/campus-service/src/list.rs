// Rust guideline compliant 2026-08-05

//! Ticket listing and filtering across the student set.

use campus_core::{Student, Ticket};
use rayon::prelude::*;
use serde::Serialize;

/// A ticket row joined with its owning student's name, for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketWithOwner {
    /// The ticket itself.
    pub ticket: Ticket,
    /// Name of the owning student.
    pub student_name: String,
}

/// List options for filtering and sorting ticket rows.
#[derive(Debug, Clone, Default)]
pub struct TicketListOptions {
    /// Filter by open/closed state.
    pub active: Option<bool>,
    /// Filter by owning student ID.
    pub student_id: Option<String>,
    /// Sort field override. Default keeps store order.
    pub sort: Option<String>,
}

/// Flattens the student set into ticket rows carrying the owner's name.
///
/// # Arguments
///
/// * `students` - Students with their embedded tickets
///
/// # Returns
///
/// One row per ticket, in store order.
pub fn flatten_tickets(students: &[Student]) -> Vec<TicketWithOwner> {
    students
        .iter()
        .flat_map(|student| {
            student.tickets.iter().map(|ticket| TicketWithOwner {
                ticket: ticket.clone(),
                student_name: student.name.clone(),
            })
        })
        .collect()
}

/// Filters and optionally sorts ticket rows based on `TicketListOptions`.
///
/// Without a sort field the store order of the input is preserved.
///
/// # Arguments
///
/// * `rows` - Ticket rows to filter
/// * `options` - List options
///
/// # Returns
///
/// The filtered (and possibly sorted) rows.
pub fn list_tickets(rows: Vec<TicketWithOwner>, options: &TicketListOptions) -> Vec<TicketWithOwner> {
    let mut rows = apply_filters(rows, options);

    if let Some(field) = &options.sort {
        sort_rows(&mut rows, field);
    }

    rows
}

fn apply_filters(rows: Vec<TicketWithOwner>, options: &TicketListOptions) -> Vec<TicketWithOwner> {
    const PARALLEL_THRESHOLD: usize = 1_000;

    let predicate = |row: &TicketWithOwner| {
        if let Some(active) = options.active {
            if row.ticket.active != active {
                return false;
            }
        }

        if let Some(ref student_id) = options.student_id {
            if row.ticket.student_id != *student_id {
                return false;
            }
        }

        true
    };

    if rows.len() >= PARALLEL_THRESHOLD {
        rows.into_par_iter().filter(|r| predicate(r)).collect()
    } else {
        rows.into_iter().filter(predicate).collect()
    }
}

fn sort_rows(rows: &mut [TicketWithOwner], field: &str) {
    match field {
        "id" => rows.sort_by(|a, b| a.ticket.id.cmp(&b.ticket.id)),
        "issue" => rows.sort_by(|a, b| a.ticket.issue.cmp(&b.ticket.issue)),
        "student" => rows.sort_by(|a, b| a.student_name.cmp(&b.student_name)),
        _ => rows.sort_by(|a, b| a.ticket.created_on.cmp(&b.ticket.created_on)),
    }
}
