// Rust guideline compliant 2026-08-05

//! The student service: CRUD orchestration for students and tickets.
//!
//! Every operation exists on two surfaces. The `try_` methods return
//! typed errors so callers can distinguish validation failures,
//! not-found, and store failures. The plain methods are the
//! presence-based contract the presentation layer consumes: every
//! failure collapses to `None`/`false`/empty, with the underlying reason
//! logged at warn level. All entity mutation goes through this service;
//! nothing else writes to the store.

use crate::context::DataContext;
use crate::error::{AppError, Result};
use crate::list::{self, TicketListOptions, TicketWithOwner};
use crate::probe;
use campus_core::{Config, NewStudent, Storage, Student, Ticket};
use std::time::Duration;
use tracing::warn;

/// Application service for students and their tickets.
pub struct StudentService {
    storage: Storage,
    config: Config,
}

impl StudentService {
    /// Creates a service over an already-opened storage engine.
    pub fn new(storage: Storage, config: Config) -> Self {
        Self { storage, config }
    }

    /// Opens a service for a discovered data directory.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The data directory context
    ///
    /// # Errors
    ///
    /// Returns an error if the storage or configuration cannot be
    /// loaded.
    pub fn open(ctx: &DataContext) -> Result<Self> {
        let storage = ctx.open_storage()?;
        let config = ctx.load_config()?;
        Ok(Self::new(storage, config))
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Checks a photo URL for remote reachability when probing is
    /// configured on.
    fn check_photo_url(&self, photo_url: Option<&str>) -> Result<()> {
        if !self.config.probe_photo_urls {
            return Ok(());
        }

        if let Some(url) = photo_url {
            let timeout = Duration::from_secs(self.config.probe_timeout_secs);
            if !probe::resource_exists(url, timeout) {
                return Err(AppError::InvalidInput(format!(
                    "Photo URL '{}' does not reference an existing resource",
                    url
                )));
            }
        }

        Ok(())
    }
}

/// Strict surface: typed errors for callers that need to distinguish
/// failure kinds.
impl StudentService {
    /// Returns all students with their ticket collections populated, in
    /// store order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn try_list_students(&self) -> Result<Vec<Student>> {
        Ok(self.storage.load_all()?)
    }

    /// Fetches a student by ID, tickets included.
    ///
    /// # Errors
    ///
    /// Returns an error if the student does not exist or the store
    /// cannot be read.
    pub fn try_get_student(&self, id: &str) -> Result<Student> {
        Ok(self.storage.load_by_id(id)?)
    }

    /// Validates and persists a new student.
    ///
    /// The profile constraints are re-asserted here even when the caller
    /// validated already, and the photo URL is probed for reachability
    /// when configured.
    ///
    /// # Arguments
    ///
    /// * `new` - The creation draft
    ///
    /// # Returns
    ///
    /// The persisted student with its store-assigned ID and an empty
    /// ticket collection.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the store write fails.
    pub fn try_add_student(&self, new: NewStudent) -> Result<Student> {
        new.validate()?;
        self.check_photo_url(new.photo_url.as_deref())?;
        Ok(self.storage.insert_student(new)?)
    }

    /// Overwrites an existing student's mutable fields.
    ///
    /// The stored ticket collection is never touched by this operation;
    /// ticket mutation happens exclusively through the ticket
    /// operations.
    ///
    /// # Arguments
    ///
    /// * `student` - The student carrying the new field values; its `id`
    ///   must reference an existing student
    ///
    /// # Errors
    ///
    /// Returns an error if the student is not found, validation fails,
    /// or the write fails.
    pub fn try_update_student(&self, student: &Student) -> Result<Student> {
        self.check_photo_url(student.photo_url.as_deref())?;
        Ok(self.storage.update_student(student)?)
    }

    /// Deletes a student and, atomically with it, every ticket it owns.
    ///
    /// # Errors
    ///
    /// Returns an error if the student is not found or the write fails.
    pub fn try_delete_student(&self, id: &str) -> Result<()> {
        Ok(self.storage.delete_student(id)?)
    }

    /// Creates an open ticket for an existing student.
    ///
    /// # Arguments
    ///
    /// * `student_id` - The owning student
    /// * `issue` - The issue text, 5-100 characters after trimming
    ///
    /// # Errors
    ///
    /// Returns an error if the issue is invalid, the student does not
    /// exist, or the write fails.
    pub fn try_create_ticket(&self, student_id: &str, issue: &str) -> Result<Ticket> {
        Ok(self.storage.insert_ticket(student_id, issue)?)
    }

    /// Fetches a ticket by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticket does not exist or the store cannot
    /// be read.
    pub fn try_get_ticket(&self, id: &str) -> Result<Ticket> {
        Ok(self.storage.find_ticket(id)?)
    }

    /// Updates a ticket's issue text; `active` and the owning student
    /// are untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue is invalid, the ticket is not
    /// found, or the write fails.
    pub fn try_update_ticket(&self, id: &str, issue: &str) -> Result<Ticket> {
        Ok(self.storage.update_ticket(id, issue)?)
    }

    /// Deletes a single ticket.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticket is not found or the write fails.
    pub fn try_delete_ticket(&self, id: &str) -> Result<()> {
        Ok(self.storage.delete_ticket(id)?)
    }

    /// Closes an open ticket.
    ///
    /// Closing is one-directional and non-idempotent: closing an
    /// already-closed ticket returns `Error::TicketClosed` rather than
    /// silently succeeding, so callers can report that nothing was
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticket is not found, already closed, or
    /// the write fails.
    pub fn try_close_ticket(&self, id: &str) -> Result<Ticket> {
        Ok(self.storage.close_ticket(id)?)
    }

    /// Returns every open ticket across all students, each row carrying
    /// the owning student's name, in store order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn try_open_tickets(&self) -> Result<Vec<TicketWithOwner>> {
        let students = self.storage.load_all()?;
        let rows = list::flatten_tickets(&students);
        let options = TicketListOptions {
            active: Some(true),
            ..TicketListOptions::default()
        };
        Ok(list::list_tickets(rows, &options))
    }
}

/// Presence surface: the original service contract. Failure reasons are
/// merged into an absent signal and logged.
impl StudentService {
    /// Returns all students; store failures yield an empty list.
    pub fn list_students(&self) -> Vec<Student> {
        match self.try_list_students() {
            Ok(students) => students,
            Err(err) => {
                warn!(error = %err, "list_students failed");
                Vec::new()
            }
        }
    }

    /// Fetches a student by ID, or `None` if absent.
    pub fn get_student(&self, id: &str) -> Option<Student> {
        absent("get_student", self.try_get_student(id))
    }

    /// Adds a student, or `None` if validation or the write failed.
    pub fn add_student(&self, new: NewStudent) -> Option<Student> {
        absent("add_student", self.try_add_student(new))
    }

    /// Updates a student, or `None` if it was not found or the write
    /// failed.
    pub fn update_student(&self, student: &Student) -> Option<Student> {
        absent("update_student", self.try_update_student(student))
    }

    /// Deletes a student and its tickets; returns whether the student
    /// existed and was removed.
    pub fn delete_student(&self, id: &str) -> bool {
        removed("delete_student", self.try_delete_student(id))
    }

    /// Creates a ticket, or `None` if the student is missing or the
    /// issue is invalid.
    pub fn create_ticket(&self, student_id: &str, issue: &str) -> Option<Ticket> {
        absent("create_ticket", self.try_create_ticket(student_id, issue))
    }

    /// Fetches a ticket by ID, or `None` if absent.
    pub fn get_ticket(&self, id: &str) -> Option<Ticket> {
        absent("get_ticket", self.try_get_ticket(id))
    }

    /// Updates a ticket's issue, or `None` on failure.
    pub fn update_ticket(&self, id: &str, issue: &str) -> Option<Ticket> {
        absent("update_ticket", self.try_update_ticket(id, issue))
    }

    /// Deletes a ticket; returns whether it existed and was removed.
    pub fn delete_ticket(&self, id: &str) -> bool {
        removed("delete_ticket", self.try_delete_ticket(id))
    }

    /// Closes a ticket, or `None` if it is missing or already closed.
    pub fn close_ticket(&self, id: &str) -> Option<Ticket> {
        absent("close_ticket", self.try_close_ticket(id))
    }

    /// Returns every open ticket with its owner's name; store failures
    /// yield an empty list.
    pub fn get_open_tickets(&self) -> Vec<TicketWithOwner> {
        match self.try_open_tickets() {
            Ok(rows) => rows,
            Err(err) => {
                warn!(error = %err, "get_open_tickets failed");
                Vec::new()
            }
        }
    }
}

/// Collapses a strict result to the presence signal, logging the reason.
fn absent<T>(op: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(error = %err, operation = op, "operation reported absent");
            None
        }
    }
}

/// Collapses a strict unit result to the removed/not-removed signal.
fn removed(op: &str, result: Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, operation = op, "operation reported failure");
            false
        }
    }
}
