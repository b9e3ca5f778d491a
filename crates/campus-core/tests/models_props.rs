// Rust guideline compliant 2026-08-05

//! Property-based tests for the data models.
//!
//! These tests validate universal properties that should hold across all
//! valid inputs.

use campus_core::models::{ISSUE_MAX_LEN, ISSUE_MIN_LEN};
use campus_core::{Classification, NewStudent};
use proptest::prelude::*;

/// Generates arbitrary grades across the valid domain.
fn arb_grade() -> impl Strategy<Value = f64> {
    0.0f64..=100.0f64
}

/// Generates arbitrary valid student drafts.
fn arb_draft() -> impl Strategy<Value = NewStudent> {
    (
        prop::string::string_regex("[A-Za-z][A-Za-z ]{0,40}").unwrap(),
        prop::string::string_regex("[a-z0-9]{1,12}@[a-z0-9]{1,12}\\.[a-z]{2,4}").unwrap(),
        prop::string::string_regex("[A-Za-z][A-Za-z ]{0,30}").unwrap(),
        16u8..=80u8,
        arb_grade(),
    )
        .prop_map(|(name, email, course, age, grade)| NewStudent {
            name,
            email,
            course,
            age,
            grade,
            photo_url: None,
        })
}

proptest! {
    /// Classification is total over the valid grade domain and each
    /// grade maps to exactly the band its range implies.
    #[test]
    fn prop_classification_matches_band(grade in arb_grade()) {
        let classification = Classification::from_grade(grade);

        if grade < 50.0 {
            prop_assert_eq!(classification, Classification::Fail);
        } else if grade < 70.0 {
            prop_assert_eq!(classification, Classification::Pass);
        } else if grade < 80.0 {
            prop_assert_eq!(classification, Classification::Commendation);
        } else {
            prop_assert_eq!(classification, Classification::Distinction);
        }
    }

    /// Band membership round-trips: "Fail" iff grade < 50, etc.
    #[test]
    fn prop_classification_iff_ranges(grade in arb_grade()) {
        let c = Classification::from_grade(grade);
        prop_assert_eq!(c == Classification::Fail, grade < 50.0);
        prop_assert_eq!(c == Classification::Pass, (50.0..70.0).contains(&grade));
        prop_assert_eq!(c == Classification::Commendation, (70.0..80.0).contains(&grade));
        prop_assert_eq!(c == Classification::Distinction, grade >= 80.0);
    }

    /// Every draft produced by the valid-generator passes validation.
    #[test]
    fn prop_valid_drafts_validate(draft in arb_draft()) {
        prop_assert!(draft.validate().is_ok());
    }

    /// Ages outside [16, 80] are always rejected.
    #[test]
    fn prop_out_of_range_age_rejected(draft in arb_draft(), age in prop_oneof![0u8..16u8, 81u8..=255u8]) {
        let mut draft = draft;
        draft.age = age;
        prop_assert!(draft.validate().is_err());
    }

    /// Grades outside [0, 100] are always rejected.
    #[test]
    fn prop_out_of_range_grade_rejected(draft in arb_draft(), grade in prop_oneof![-1.0e6f64..-0.001f64, 100.001f64..1.0e6f64]) {
        let mut draft = draft;
        draft.grade = grade;
        prop_assert!(draft.validate().is_err());
    }

    /// Issue validation accepts exactly the [5, 100] character window.
    #[test]
    fn prop_issue_length_window(len in 0usize..200usize) {
        let issue = "x".repeat(len);
        let valid = campus_core::models::check_issue(&issue).is_ok();
        prop_assert_eq!(valid, (ISSUE_MIN_LEN..=ISSUE_MAX_LEN).contains(&len));
    }
}
