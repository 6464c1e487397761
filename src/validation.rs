//! Boundary checks that run before any persistence operation.
//!
//! Every function here is pure: no I/O, no state. Handlers and services call
//! them first so that invalid input never reaches the database.

use crate::error::{AppError, Result};
use crate::models::TodoStatus;

/// Parses a path segment as a base-10 row id.
pub fn validate_id(raw: &str) -> Result<i32> {
    raw.parse::<i32>()
        .map_err(|_| AppError::InvalidId(raw.to_string()))
}

/// Accepts an absent status (meaning "default" or "leave unchanged") or one of
/// the enumerated values.
pub fn validate_status(value: Option<&str>) -> Result<Option<TodoStatus>> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .parse::<TodoStatus>()
            .map(Some)
            .map_err(|_| AppError::InvalidStatus(raw.to_string())),
    }
}

/// `validate_status` for a JSON field that tells an explicit `null` apart from
/// a missing key. `null` is never a valid status.
pub fn validate_status_field(value: Option<Option<&str>>) -> Result<Option<TodoStatus>> {
    match value {
        None => Ok(None),
        Some(None) => Err(AppError::InvalidStatus("null".to_string())),
        Some(Some(raw)) => validate_status(Some(raw)),
    }
}

/// Fails with `IncompleteData` naming every field that is absent or blank.
pub fn validate_required(fields: &[(&'static str, Option<&str>)]) -> Result<()> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::IncompleteData(missing))
    }
}

/// Fails with `NoUpdateData` when none of the optional fields was supplied.
pub fn validate_has_update(supplied: &[bool]) -> Result<()> {
    if supplied.iter().any(|present| *present) {
        Ok(())
    } else {
        Err(AppError::NoUpdateData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_parse() {
        assert_eq!(validate_id("42").unwrap(), 42);
        assert_eq!(validate_id("-1").unwrap(), -1);
    }

    #[test]
    fn non_numeric_ids_are_rejected() {
        for raw in ["abc", "12abc", "1.5", "", " 7", "99999999999"] {
            assert!(
                matches!(validate_id(raw), Err(AppError::InvalidId(ref r)) if r == raw),
                "expected InvalidId for {:?}",
                raw
            );
        }
    }

    #[test]
    fn status_accepts_absent_and_enumerated_values() {
        assert_eq!(validate_status(None).unwrap(), None);
        assert_eq!(
            validate_status(Some("In Progress")).unwrap(),
            Some(TodoStatus::InProgress)
        );
    }

    #[test]
    fn status_rejects_unknown_values() {
        assert!(matches!(
            validate_status(Some("Bad")),
            Err(AppError::InvalidStatus(ref s)) if s == "Bad"
        ));
        assert!(validate_status(Some("")).is_err());
    }

    #[test]
    fn explicit_null_status_is_invalid() {
        assert_eq!(validate_status_field(None).unwrap(), None);
        assert_eq!(
            validate_status_field(Some(Some("Done"))).unwrap(),
            Some(TodoStatus::Done)
        );
        assert!(matches!(
            validate_status_field(Some(None)),
            Err(AppError::InvalidStatus(ref s)) if s == "null"
        ));
    }

    #[test]
    fn required_reports_missing_and_blank_fields() {
        assert!(validate_required(&[("name", Some("Ada")), ("email", Some("a@b.c"))]).is_ok());

        match validate_required(&[("name", Some("   ")), ("email", None)]) {
            Err(AppError::IncompleteData(fields)) => assert_eq!(fields, vec!["name", "email"]),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn has_update_needs_one_supplied_field() {
        assert!(validate_has_update(&[false, true, false]).is_ok());
        assert!(matches!(
            validate_has_update(&[false, false, false]),
            Err(AppError::NoUpdateData)
        ));
    }
}
