// Rust guideline compliant 2026-08-05

//! Storage engine for the student register.
//!
//! Students are persisted as one JSONL record each, with their tickets
//! embedded in the owning record. The engine provides streaming reads,
//! atomic writes (temp file + rename), file locking, and the
//! entity-level operations the service layer builds on: identifier
//! assignment, referential integrity between students and tickets, and
//! cascading deletion as a single-record write.

use crate::models::{NewStudent, Student, Ticket};
use crate::{identity, models, Error, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Storage engine for Student records.
pub struct Storage {
    /// Path to the students JSONL file.
    path: PathBuf,
}

impl Storage {
    /// Creates a new Storage instance.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the students JSONL file
    ///
    /// # Returns
    ///
    /// A new Storage instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is invalid.
    pub fn new(path: PathBuf) -> Result<Self> {
        Self::validate_path(&path)?;
        Ok(Self { path })
    }

    /// Validates that the path is suitable for storage operations.
    fn validate_path(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path cannot be empty",
            )));
        }
        Ok(())
    }

    /// Returns a reference to the students JSONL file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage {
    /// Loads all Students from the JSONL file, one record per line.
    ///
    /// Each student record carries its tickets, so the result is always
    /// eagerly populated.
    ///
    /// # Returns
    ///
    /// A vector of all Students in the file, in file order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened
    /// - A record fails validation
    pub fn load_all(&self) -> Result<Vec<Student>> {
        use std::fs::File;
        use std::io::{BufRead, BufReader};

        // Handle missing file case
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut students = Vec::new();

        // One record per line; lines stream through without buffering the file
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Student>(&line) {
                Ok(student) => {
                    student.validate()?;
                    students.push(student);
                }
                Err(e) => {
                    // Log malformed JSON but continue processing
                    warn!(error = %e, "Skipping malformed JSONL line");
                }
            }
        }

        Ok(students)
    }

    /// Loads a single Student by ID with early termination.
    ///
    /// # Arguments
    ///
    /// * `id` - The Student ID to search for
    ///
    /// # Returns
    ///
    /// The Student, tickets included.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened
    /// - The Student is not found
    pub fn load_by_id(&self, id: &str) -> Result<Student> {
        use std::fs::File;
        use std::io::{BufRead, BufReader};

        if !self.path.exists() {
            return Err(Error::NotFound(id.to_string()));
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Student>(&line) {
                Ok(student) => {
                    if student.id == id {
                        student.validate()?;
                        return Ok(student);
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Skipping malformed JSONL line");
                }
            }
        }

        Err(Error::NotFound(id.to_string()))
    }
}

impl Storage {
    /// Saves a single Student record.
    ///
    /// If the Student already exists (by ID), the record is replaced.
    /// Otherwise it is appended. Uses atomic write operations.
    ///
    /// # Arguments
    ///
    /// * `student` - The Student to save
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The Student fails validation
    /// - The file cannot be read or written
    pub fn save(&self, student: &Student) -> Result<()> {
        student.validate()?;

        let mut students = self.load_all().unwrap_or_default();

        if let Some(pos) = students.iter().position(|s| s.id == student.id) {
            students[pos] = student.clone();
        } else {
            students.push(student.clone());
        }

        self.save_all(&students)
    }

    /// Saves the full set of Student records.
    ///
    /// Replaces the entire file with the provided Students.
    /// Uses atomic write operations (temp file + rename).
    ///
    /// # Arguments
    ///
    /// * `students` - The Students to save
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any Student fails validation
    /// - The file cannot be written
    pub fn save_all(&self, students: &[Student]) -> Result<()> {
        use std::fs::File;
        use std::io::Write;

        // Validate all records first
        for student in students {
            student.validate()?;
        }

        // Create temp file in the same directory for atomic rename
        let temp_path = self.path.with_extension("jsonl.tmp");

        {
            let mut file = File::create(&temp_path)?;

            for student in students {
                // Serialize to single line (no newlines within JSON)
                let json = serde_json::to_string(student)?;
                file.write_all(json.as_bytes())?;
                file.write_all(b"\n")?;
            }

            file.sync_all()?;
        }

        // Atomic rename
        std::fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}

impl Storage {
    /// Executes a closure with an exclusive lock on the storage file.
    ///
    /// Acquires a platform-appropriate file lock (flock on Unix,
    /// LockFileEx on Windows) before executing the closure, so concurrent
    /// write cycles are serialized.
    ///
    /// # Arguments
    ///
    /// * `f` - The closure to execute while holding the lock
    ///
    /// # Returns
    ///
    /// The result of the closure execution.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The lock cannot be acquired
    /// - The closure returns an error
    pub fn with_lock<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        use fs2::FileExt;
        use std::fs::OpenOptions;

        let lock_path = self.path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&lock_path)?;

        // Non-blocking: a held lock surfaces as a failed store call
        lock_file.try_lock_exclusive().map_err(|e| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::WouldBlock,
                format!("Failed to acquire lock: {}", e),
            ))
        })?;

        // Execute the closure
        let result = f();

        // Ensure lock is released (even if closure fails)
        let _ = lock_file.unlock();

        result
    }
}

impl Storage {
    /// Inserts a new Student, assigning its identifier.
    ///
    /// The draft is validated, given a fresh `stu-` ID unique within the
    /// store, and persisted with an empty ticket collection. The whole
    /// operation runs as one locked load-mutate-save cycle.
    ///
    /// # Arguments
    ///
    /// * `new` - The creation draft
    ///
    /// # Returns
    ///
    /// The persisted Student with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is invalid or the write fails.
    pub fn insert_student(&self, new: NewStudent) -> Result<Student> {
        new.validate()?;

        self.with_lock(|| {
            let mut students = self.load_all()?;

            let now = Utc::now();
            let mut nonce = 0u32;
            let id = loop {
                let id = identity::student_id(&new.name, &new.email, now.timestamp(), nonce);
                if !students.iter().any(|s| s.id == id) {
                    break id;
                }
                nonce = nonce.saturating_add(1);
            };

            let student = Student {
                id,
                name: new.name.clone(),
                email: new.email.clone(),
                course: new.course.clone(),
                age: new.age,
                grade: new.grade,
                photo_url: new.photo_url.clone(),
                tickets: Vec::new(),
            };

            students.push(student.clone());
            self.save_all(&students)?;

            Ok(student)
        })
    }

    /// Overwrites a Student's mutable fields.
    ///
    /// The stored ticket collection is preserved: ticket mutation happens
    /// exclusively through the ticket operations, never as a side channel
    /// of a student update.
    ///
    /// # Arguments
    ///
    /// * `update` - The Student carrying the new field values
    ///
    /// # Returns
    ///
    /// The persisted Student, stored tickets included.
    ///
    /// # Errors
    ///
    /// Returns an error if the Student does not exist, the merged record
    /// is invalid, or the write fails.
    pub fn update_student(&self, update: &Student) -> Result<Student> {
        self.with_lock(|| {
            let mut students = self.load_all()?;

            let pos = students
                .iter()
                .position(|s| s.id == update.id)
                .ok_or_else(|| Error::NotFound(update.id.clone()))?;

            let mut merged = update.clone();
            merged.tickets = students[pos].tickets.clone();
            merged.validate()?;

            students[pos] = merged.clone();
            self.save_all(&students)?;

            Ok(merged)
        })
    }

    /// Deletes a Student and, with it, every ticket it owns.
    ///
    /// Tickets live inside the owning student's record, so the cascade is
    /// a single-record removal in one atomic write; the store can never
    /// be left with orphaned tickets.
    ///
    /// # Arguments
    ///
    /// * `id` - The Student ID
    ///
    /// # Errors
    ///
    /// Returns an error if the Student is not found or the write fails.
    pub fn delete_student(&self, id: &str) -> Result<()> {
        self.with_lock(|| {
            let mut students = self.load_all()?;

            let initial_len = students.len();
            students.retain(|s| s.id != id);

            if students.len() == initial_len {
                return Err(Error::NotFound(id.to_string()));
            }

            self.save_all(&students)
        })
    }
}

impl Storage {
    /// Creates a Ticket inside an existing Student.
    ///
    /// The owning student must exist; the ticket is created open
    /// (`active = true`) with its creation timestamp set once, given a
    /// fresh `tkt-` ID unique across the store, and appended to the
    /// owner's collection.
    ///
    /// # Arguments
    ///
    /// * `student_id` - The owning Student ID
    /// * `issue` - The issue text, 5-100 characters after trimming
    ///
    /// # Returns
    ///
    /// The persisted Ticket.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The issue violates the length constraint
    /// - The Student does not exist
    /// - The write fails
    pub fn insert_ticket(&self, student_id: &str, issue: &str) -> Result<Ticket> {
        models::check_issue(issue)?;

        self.with_lock(|| {
            let mut students = self.load_all()?;

            let pos = students
                .iter()
                .position(|s| s.id == student_id)
                .ok_or_else(|| Error::NotFound(student_id.to_string()))?;

            let issue = issue.trim().to_string();
            let now = Utc::now();
            let mut nonce = 0u32;
            let id = loop {
                let id = identity::ticket_id(student_id, &issue, now.timestamp(), nonce);
                let taken = students
                    .iter()
                    .any(|s| s.tickets.iter().any(|t| t.id == id));
                if !taken {
                    break id;
                }
                nonce = nonce.saturating_add(1);
            };

            let ticket = Ticket {
                id,
                issue,
                created_on: now,
                active: true,
                student_id: student_id.to_string(),
            };

            students[pos].tickets.push(ticket.clone());
            self.save_all(&students)?;

            Ok(ticket)
        })
    }

    /// Finds a Ticket by ID across all students.
    ///
    /// # Arguments
    ///
    /// * `id` - The Ticket ID
    ///
    /// # Returns
    ///
    /// The Ticket.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no student owns a ticket with the ID.
    pub fn find_ticket(&self, id: &str) -> Result<Ticket> {
        let students = self.load_all()?;

        students
            .iter()
            .flat_map(|s| s.tickets.iter())
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Updates a Ticket's issue text.
    ///
    /// Only `issue` changes; `active`, `created_on` and the owning
    /// student are untouched.
    ///
    /// # Arguments
    ///
    /// * `id` - The Ticket ID
    /// * `issue` - The replacement issue text
    ///
    /// # Returns
    ///
    /// The updated Ticket.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue is invalid, the Ticket is not
    /// found, or the write fails.
    pub fn update_ticket(&self, id: &str, issue: &str) -> Result<Ticket> {
        models::check_issue(issue)?;

        self.with_lock(|| {
            let mut students = self.load_all()?;

            let ticket = Self::ticket_mut(&mut students, id)?;
            ticket.issue = issue.trim().to_string();
            let updated = ticket.clone();

            self.save_all(&students)?;
            Ok(updated)
        })
    }

    /// Deletes a single Ticket.
    ///
    /// # Arguments
    ///
    /// * `id` - The Ticket ID
    ///
    /// # Errors
    ///
    /// Returns an error if the Ticket is not found or the write fails.
    pub fn delete_ticket(&self, id: &str) -> Result<()> {
        self.with_lock(|| {
            let mut students = self.load_all()?;

            let mut removed = false;
            for student in &mut students {
                let before = student.tickets.len();
                student.tickets.retain(|t| t.id != id);
                if student.tickets.len() != before {
                    removed = true;
                    break;
                }
            }

            if !removed {
                return Err(Error::NotFound(id.to_string()));
            }

            self.save_all(&students)
        })
    }

    /// Closes an open Ticket.
    ///
    /// # Arguments
    ///
    /// * `id` - The Ticket ID
    ///
    /// # Returns
    ///
    /// The closed Ticket.
    ///
    /// # Errors
    ///
    /// Returns an error if the Ticket is not found, is already closed,
    /// or the write fails.
    pub fn close_ticket(&self, id: &str) -> Result<Ticket> {
        self.with_lock(|| {
            let mut students = self.load_all()?;

            let ticket = Self::ticket_mut(&mut students, id)?;
            ticket.close()?;
            let closed = ticket.clone();

            self.save_all(&students)?;
            Ok(closed)
        })
    }

    fn ticket_mut<'a>(students: &'a mut [Student], id: &str) -> Result<&'a mut Ticket> {
        students
            .iter_mut()
            .flat_map(|s| s.tickets.iter_mut())
            .find(|t| t.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }
}
