//! Discriminated-union validation.
//!
//! A flat schema cannot say "these fields are required *if* `kind` is `new`". This module
//! validates a tagged JSON object in two steps: first the discriminator is matched against the
//! declared variant tags, then only the matched variant's required fields are checked.
//!
//! Schemas are plain `'static` data so a union can be declared as a `const` next to the typed
//! enum it guards (see [`crate::order::PATIENT_UNION`]).

use serde_json::{Map, Value};

use crate::error::{FieldViolation, ValidationError, ValidationResult};

/// Dotted location of a field within the request body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// The empty path, i.e. the request body itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with `name` appended.
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.to_owned());
        Self(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Required fields for one value of the discriminator.
///
/// Each field must be present, a string, and not the empty string.
#[derive(Clone, Copy, Debug)]
pub struct VariantSchema {
    pub tag: &'static str,
    pub required: &'static [&'static str],
}

/// A closed set of variants selected by a discriminator field.
#[derive(Clone, Copy, Debug)]
pub struct DiscriminatedUnion {
    pub discriminator: &'static str,
    pub variants: &'static [VariantSchema],
}

/// A payload that passed validation for exactly one variant.
///
/// The discriminator is kept inside `fields`, so the object can be decoded into an
/// internally-tagged enum without re-inserting it.
#[derive(Clone, Copy, Debug)]
pub struct ValidatedVariant<'v> {
    pub tag: &'static str,
    pub fields: &'v Map<String, Value>,
}

impl DiscriminatedUnion {
    pub const fn new(discriminator: &'static str, variants: &'static [VariantSchema]) -> Self {
        Self {
            discriminator,
            variants,
        }
    }

    /// Declared tags, in declaration order.
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.variants.iter().map(|v| v.tag)
    }

    /// Look up the schema for `tag`.
    pub fn variant(&self, tag: &str) -> Option<&VariantSchema> {
        self.variants.iter().find(|v| v.tag == tag)
    }

    /// Validate `value` (the union field found at `path`) against this union.
    ///
    /// # Arguments
    /// * `value` - The raw field value, `None` when the field is absent
    /// * `path` - Location of the union field, used in violation reports
    ///
    /// # Returns
    /// The matched variant tag together with the object's fields.
    ///
    /// # Errors
    /// Returns a `ValidationError` if:
    /// - the union field is absent, null, or the empty string,
    /// - the union field is not an object,
    /// - the discriminator is absent or not one of the declared tags (reported once; the
    ///   variant's fields are not inspected in that case), or
    /// - any required field of the matched variant fails. All such failures are reported.
    pub fn validate<'v>(
        &self,
        value: Option<&'v Value>,
        path: &FieldPath,
    ) -> ValidationResult<ValidatedVariant<'v>> {
        if is_empty_value(value) {
            return Err(FieldViolation::is_not_empty(path).into());
        }

        let Some(fields) = value.and_then(Value::as_object) else {
            return Err(FieldViolation::is_object(path).into());
        };

        let tag_path = path.child(self.discriminator);
        let schema = fields
            .get(self.discriminator)
            .and_then(Value::as_str)
            .and_then(|tag| self.variant(tag))
            .ok_or_else(|| FieldViolation::is_in(&tag_path, self.tags()))?;

        let violations: Vec<FieldViolation> = schema
            .required
            .iter()
            .filter_map(|name| check_required_text(fields.get(*name), &path.child(name)))
            .collect();

        match ValidationError::from_violations(violations) {
            Some(err) => Err(err),
            None => Ok(ValidatedVariant {
                tag: schema.tag,
                fields,
            }),
        }
    }
}

/// Absent, `null` and `""` all count as empty.
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn check_required_text(value: Option<&Value>, path: &FieldPath) -> Option<FieldViolation> {
    if is_empty_value(value) {
        Some(FieldViolation::is_not_empty(path))
    } else if !matches!(value, Some(Value::String(_))) {
        Some(FieldViolation::is_string(path))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Constraint;
    use serde_json::json;

    const SHAPES: DiscriminatedUnion = DiscriminatedUnion::new(
        "type",
        &[
            VariantSchema {
                tag: "circle",
                required: &["radius"],
            },
            VariantSchema {
                tag: "rect",
                required: &["width", "height"],
            },
        ],
    );

    fn shape_path() -> FieldPath {
        FieldPath::root().child("shape")
    }

    #[test]
    fn field_path_renders_dotted() {
        let path = FieldPath::root().child("patient").child("firstName");
        assert_eq!(path.to_string(), "patient.firstName");
        assert!(FieldPath::root().is_root());
        assert!(!path.is_root());
    }

    #[test]
    fn matches_variant_and_keeps_discriminator() {
        let value = json!({"type": "rect", "width": "3", "height": "4"});
        let validated = SHAPES
            .validate(Some(&value), &shape_path())
            .expect("rect should validate");

        assert_eq!(validated.tag, "rect");
        assert_eq!(validated.fields.get("type"), Some(&json!("rect")));
    }

    #[test]
    fn only_matched_variant_fields_are_required() {
        let value = json!({"type": "circle", "radius": "2"});
        assert!(SHAPES.validate(Some(&value), &shape_path()).is_ok());
    }

    #[test]
    fn ignores_unknown_extra_fields() {
        let value = json!({"type": "circle", "radius": "2", "colour": "red"});
        assert!(SHAPES.validate(Some(&value), &shape_path()).is_ok());
    }

    #[test]
    fn rejects_absent_null_and_empty_union_field() {
        for value in [None, Some(json!(null)), Some(json!(""))] {
            let err = SHAPES
                .validate(value.as_ref(), &shape_path())
                .expect_err("empty union should fail");
            assert_eq!(err.violations().len(), 1);
            assert_eq!(err.violations()[0].constraint, Constraint::IsNotEmpty);
            assert_eq!(err.violations()[0].field, "shape");
        }
    }

    #[test]
    fn rejects_non_object_union_field() {
        let value = json!(["circle"]);
        let err = SHAPES
            .validate(Some(&value), &shape_path())
            .expect_err("array should fail");
        assert_eq!(err.violations()[0].constraint, Constraint::IsObject);
        assert_eq!(err.messages(), vec!["shape must be an object".to_string()]);
    }

    #[test]
    fn rejects_missing_unknown_and_non_string_tag() {
        for value in [
            json!({"radius": "2"}),
            json!({"type": "triangle", "radius": "2"}),
            json!({"type": "", "radius": "2"}),
            json!({"type": 7}),
        ] {
            let err = SHAPES
                .validate(Some(&value), &shape_path())
                .expect_err("bad tag should fail");
            assert_eq!(
                err.messages(),
                vec!["shape.type must be one of the following values: circle, rect".to_string()]
            );
            assert_eq!(err.violations()[0].constraint, Constraint::IsIn);
        }
    }

    #[test]
    fn tag_matching_is_case_sensitive() {
        let value = json!({"type": "Circle", "radius": "2"});
        assert!(SHAPES.validate(Some(&value), &shape_path()).is_err());
    }

    #[test]
    fn reports_every_failing_required_field() {
        let value = json!({"type": "rect", "width": "", "height": 4});
        let err = SHAPES
            .validate(Some(&value), &shape_path())
            .expect_err("rect fields should fail");

        let found: Vec<(&str, Constraint)> = err
            .violations()
            .iter()
            .map(|v| (v.field.as_str(), v.constraint))
            .collect();
        assert_eq!(
            found,
            vec![
                ("shape.width", Constraint::IsNotEmpty),
                ("shape.height", Constraint::IsString),
            ]
        );
    }

    #[test]
    fn null_required_field_counts_as_empty() {
        let value = json!({"type": "circle", "radius": null});
        let err = SHAPES
            .validate(Some(&value), &shape_path())
            .expect_err("null radius should fail");
        assert_eq!(
            err.messages(),
            vec!["shape.radius should not be empty".to_string()]
        );
    }

    #[test]
    fn is_empty_value_only_matches_absent_null_and_empty_string() {
        assert!(is_empty_value(None));
        assert!(is_empty_value(Some(&json!(null))));
        assert!(is_empty_value(Some(&json!(""))));
        assert!(!is_empty_value(Some(&json!(" "))));
        assert!(!is_empty_value(Some(&json!(0))));
        assert!(!is_empty_value(Some(&json!({}))));
    }
}
