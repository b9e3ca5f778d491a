// Rust guideline compliant 2026-08-05

//! Core data models for the campus student register.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use url::Url;

/// Minimum permitted student age.
pub const AGE_MIN: u8 = 16;

/// Maximum permitted student age.
pub const AGE_MAX: u8 = 80;

/// Minimum permitted grade.
pub const GRADE_MIN: f64 = 0.0;

/// Maximum permitted grade.
pub const GRADE_MAX: f64 = 100.0;

/// Minimum permitted ticket issue length, in characters.
pub const ISSUE_MIN_LEN: usize = 5;

/// Maximum permitted ticket issue length, in characters.
pub const ISSUE_MAX_LEN: usize = 100;

/// Academic classification derived from a student's grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Grade below 50.
    Fail,
    /// Grade in [50, 70).
    Pass,
    /// Grade in [70, 80).
    Commendation,
    /// Grade of 80 and above.
    Distinction,
}

impl Classification {
    /// Derives the classification for a grade.
    ///
    /// Pure and total over the valid grade domain [0, 100]. Boundary
    /// values (50, 70, 80) belong to the higher band.
    ///
    /// # Arguments
    ///
    /// * `grade` - The grade to classify
    ///
    /// # Returns
    ///
    /// The classification band the grade falls in.
    pub fn from_grade(grade: f64) -> Self {
        if grade < 50.0 {
            Classification::Fail
        } else if grade < 70.0 {
            Classification::Pass
        } else if grade < 80.0 {
            Classification::Commendation
        } else {
            Classification::Distinction
        }
    }

    /// Returns the display name of the classification.
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Fail => "Fail",
            Classification::Pass => "Pass",
            Classification::Commendation => "Commendation",
            Classification::Distinction => "Distinction",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A support ticket raised by a student.
///
/// A Ticket is owned by its Student and is stored embedded in the owning
/// student's record; it cannot exist without one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique hash-based identifier (format: tkt-XXXXXX).
    pub id: String,
    /// Issue description, 5-100 characters.
    pub issue: String,
    /// Creation timestamp, set once at creation.
    pub created_on: DateTime<Utc>,
    /// True while the ticket is open; false once closed.
    pub active: bool,
    /// ID of the owning Student.
    pub student_id: String,
}

impl Ticket {
    /// Validates the Ticket data.
    ///
    /// # Returns
    ///
    /// Ok if the Ticket is valid.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The ID format is invalid
    /// - The issue length is outside [5, 100] characters
    /// - The owning student ID format is invalid
    pub fn validate(&self) -> crate::Result<()> {
        crate::identity::validate_ticket_id(&self.id)?;
        check_issue(&self.issue)?;
        crate::identity::validate_student_id(&self.student_id).map_err(|_| {
            crate::Error::InvalidTicket(format!(
                "Ticket {} has malformed student ID '{}'",
                self.id, self.student_id
            ))
        })?;
        Ok(())
    }

    /// Closes the ticket.
    ///
    /// Closing is one-directional: a closed ticket never reopens, and
    /// closing an already-closed ticket is reported as an error rather
    /// than silently succeeding.
    ///
    /// # Returns
    ///
    /// Ok if the ticket was open and is now closed.
    ///
    /// # Errors
    ///
    /// Returns `Error::TicketClosed` if the ticket is already closed.
    pub fn close(&mut self) -> crate::Result<()> {
        if !self.active {
            return Err(crate::Error::TicketClosed(self.id.clone()));
        }
        self.active = false;
        Ok(())
    }
}

/// Checks a ticket issue text against the length constraint.
///
/// The issue is measured in characters after trimming.
///
/// # Arguments
///
/// * `issue` - The issue text
///
/// # Returns
///
/// Ok if the issue length lies in [5, 100].
///
/// # Errors
///
/// Returns `Error::InvalidTicket` otherwise.
pub fn check_issue(issue: &str) -> crate::Result<()> {
    let len = issue.trim().chars().count();
    if len < ISSUE_MIN_LEN || len > ISSUE_MAX_LEN {
        return Err(crate::Error::InvalidTicket(format!(
            "Issue must be {}-{} characters, got {}",
            ISSUE_MIN_LEN, ISSUE_MAX_LEN, len
        )));
    }
    Ok(())
}

/// A student enrolled on a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Unique hash-based identifier (format: stu-XXXXXX).
    pub id: String,
    /// Full name.
    pub name: String,
    /// Contact email address. Uniqueness across students is deliberately
    /// not enforced.
    pub email: String,
    /// Enrolled course title.
    pub course: String,
    /// Age in years, 16-80.
    pub age: u8,
    /// Current grade, 0-100.
    pub grade: f64,
    /// Optional profile photo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Tickets owned by this student.
    #[serde(default)]
    pub tickets: Vec<Ticket>,
}

impl Student {
    /// Derives the student's academic classification from the grade.
    ///
    /// This is a computed accessor, recomputed on every call; the
    /// classification is never stored and cannot be set independently.
    pub fn classification(&self) -> Classification {
        Classification::from_grade(self.grade)
    }

    /// Validates the Student data, including its embedded tickets.
    ///
    /// # Returns
    ///
    /// Ok if the Student is valid.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The ID format is invalid
    /// - A profile field violates its constraint
    /// - An embedded ticket is invalid or references another student
    pub fn validate(&self) -> crate::Result<()> {
        crate::identity::validate_student_id(&self.id)?;
        check_profile(
            &self.name,
            &self.email,
            &self.course,
            self.age,
            self.grade,
            self.photo_url.as_deref(),
        )?;

        for ticket in &self.tickets {
            ticket.validate()?;
            if ticket.student_id != self.id {
                return Err(crate::Error::InvalidTicket(format!(
                    "Ticket {} embedded in student {} references student {}",
                    ticket.id, self.id, ticket.student_id
                )));
            }
        }

        Ok(())
    }
}

/// Creation draft for a Student.
///
/// Carries every Student field except the store-assigned `id` and the
/// `tickets` collection, which starts empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStudent {
    /// Full name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Enrolled course title.
    pub course: String,
    /// Age in years, 16-80.
    pub age: u8,
    /// Current grade, 0-100.
    pub grade: f64,
    /// Optional profile photo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl NewStudent {
    /// Validates the draft against the Student profile constraints.
    ///
    /// # Returns
    ///
    /// Ok if every field is valid.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidStudent` naming the violated constraint.
    pub fn validate(&self) -> crate::Result<()> {
        check_profile(
            &self.name,
            &self.email,
            &self.course,
            self.age,
            self.grade,
            self.photo_url.as_deref(),
        )
    }
}

/// Validates the Student profile fields shared by `Student` and
/// `NewStudent`.
fn check_profile(
    name: &str,
    email: &str,
    course: &str,
    age: u8,
    grade: f64,
    photo_url: Option<&str>,
) -> crate::Result<()> {
    if name.trim().is_empty() {
        return Err(crate::Error::InvalidStudent(
            "Name cannot be empty".to_string(),
        ));
    }

    if email.trim().is_empty() {
        return Err(crate::Error::InvalidStudent(
            "Email cannot be empty".to_string(),
        ));
    }

    if !valid_email(email) {
        return Err(crate::Error::InvalidStudent(format!(
            "Malformed email address '{}'",
            email
        )));
    }

    if course.trim().is_empty() {
        return Err(crate::Error::InvalidStudent(
            "Course cannot be empty".to_string(),
        ));
    }

    if !(AGE_MIN..=AGE_MAX).contains(&age) {
        return Err(crate::Error::InvalidStudent(format!(
            "Age must be {}-{}, got {}",
            AGE_MIN, AGE_MAX, age
        )));
    }

    // NaN fails the range check as well
    if !(GRADE_MIN..=GRADE_MAX).contains(&grade) {
        return Err(crate::Error::InvalidStudent(format!(
            "Grade must be {}-{}, got {}",
            GRADE_MIN, GRADE_MAX, grade
        )));
    }

    if let Some(raw) = photo_url {
        let parsed = Url::parse(raw).map_err(|e| {
            crate::Error::InvalidStudent(format!("Malformed photo URL '{}': {}", raw, e))
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(crate::Error::InvalidStudent(format!(
                "Photo URL must be http(s), got '{}'",
                raw
            )));
        }
    }

    Ok(())
}

/// Checks an email address for syntactic validity.
fn valid_email(email: &str) -> bool {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
    });
    re.is_match(email)
}
