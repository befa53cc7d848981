use serde::Serialize;

use crate::validation::FieldPath;

/// The rule a field failed.
///
/// Serialised names follow the constraint keys API clients already expect
/// (`isNotEmpty`, `isIn`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Constraint {
    IsNotEmpty,
    IsString,
    IsObject,
    IsIn,
}

impl Constraint {
    pub fn as_str(self) -> &'static str {
        match self {
            Constraint::IsNotEmpty => "isNotEmpty",
            Constraint::IsString => "isString",
            Constraint::IsObject => "isObject",
            Constraint::IsIn => "isIn",
        }
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failed constraint on a single field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Dotted path of the offending field, e.g. `patient.firstName`.
    pub field: String,
    pub constraint: Constraint,
    /// Human-readable description, suitable for returning to API clients.
    pub message: String,
}

impl FieldViolation {
    pub fn is_not_empty(path: &FieldPath) -> Self {
        Self {
            field: path.to_string(),
            constraint: Constraint::IsNotEmpty,
            message: format!("{path} should not be empty"),
        }
    }

    pub fn is_string(path: &FieldPath) -> Self {
        Self {
            field: path.to_string(),
            constraint: Constraint::IsString,
            message: format!("{path} must be a string"),
        }
    }

    pub fn is_object(path: &FieldPath) -> Self {
        Self {
            field: path.to_string(),
            constraint: Constraint::IsObject,
            message: format!("{path} must be an object"),
        }
    }

    pub fn is_in<'a>(path: &FieldPath, allowed: impl IntoIterator<Item = &'a str>) -> Self {
        let allowed: Vec<&str> = allowed.into_iter().collect();
        Self {
            field: path.to_string(),
            constraint: Constraint::IsIn,
            message: format!(
                "{path} must be one of the following values: {}",
                allowed.join(", ")
            ),
        }
    }
}

/// Raised when an order payload does not satisfy the order schema.
///
/// Always carries at least one [`FieldViolation`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("validation failed: {}", join_messages(.violations))]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Build an error from collected violations.
    ///
    /// Returns `None` when `violations` is empty, so an empty error can never be observed.
    pub fn from_violations(violations: Vec<FieldViolation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }

    /// The violation messages in the order they were found.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }
}

impl From<FieldViolation> for ValidationError {
    fn from(violation: FieldViolation) -> Self {
        Self {
            violations: vec![violation],
        }
    }
}

fn join_messages(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_violation_list_is_not_an_error() {
        assert!(ValidationError::from_violations(Vec::new()).is_none());
    }

    #[test]
    fn display_joins_every_message() {
        let path = FieldPath::root().child("patient");
        let err = ValidationError::from_violations(vec![
            FieldViolation::is_not_empty(&path.child("firstName")),
            FieldViolation::is_string(&path.child("lastName")),
        ])
        .expect("non-empty violations");

        assert_eq!(
            err.to_string(),
            "validation failed: patient.firstName should not be empty; patient.lastName must be a string"
        );
    }

    #[test]
    fn is_in_lists_allowed_values() {
        let violation =
            FieldViolation::is_in(&FieldPath::root().child("kind"), ["new", "existing"]);
        assert_eq!(violation.constraint, Constraint::IsIn);
        assert_eq!(
            violation.message,
            "kind must be one of the following values: new, existing"
        );
    }

    #[test]
    fn constraint_serialises_as_camel_case() {
        let json = serde_json::to_value(FieldViolation::is_not_empty(
            &FieldPath::root().child("patient"),
        ))
        .expect("serialise violation");
        assert_eq!(json["constraint"], "isNotEmpty");
        assert_eq!(json["field"], "patient");
    }

    #[test]
    fn constraint_as_str_matches_serialised_name() {
        for constraint in [
            Constraint::IsNotEmpty,
            Constraint::IsString,
            Constraint::IsObject,
            Constraint::IsIn,
        ] {
            let json = serde_json::to_value(constraint).expect("serialise constraint");
            assert_eq!(json, constraint.as_str());
        }
    }
}
