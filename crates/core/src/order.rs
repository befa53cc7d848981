//! Order payloads and their acknowledgement.
//!
//! An order wraps a single [`Patient`], which is either a brand-new patient identified by name
//! or an existing patient referenced by identifier. Raw JSON is first checked against
//! [`PATIENT_UNION`] and only then decoded into the typed model, so every [`Order`] in hand is
//! known to hold exactly one well-formed variant.

use orders_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::constants::{
    BODY_FIELD, EXISTING_PATIENT_KIND, FIRST_NAME_FIELD, KIND_FIELD, LAST_NAME_FIELD,
    NEW_PATIENT_KIND, PATIENT_FIELD, PATIENT_ID_FIELD,
};
use crate::error::{FieldViolation, ValidationResult};
use crate::validation::{DiscriminatedUnion, FieldPath, VariantSchema};

/// Variant schemas for [`Patient`], keyed by the `kind` discriminator.
pub const PATIENT_UNION: DiscriminatedUnion = DiscriminatedUnion::new(
    KIND_FIELD,
    &[
        VariantSchema {
            tag: NEW_PATIENT_KIND,
            required: &[FIRST_NAME_FIELD, LAST_NAME_FIELD],
        },
        VariantSchema {
            tag: EXISTING_PATIENT_KIND,
            required: &[PATIENT_ID_FIELD],
        },
    ],
);

/// The patient an order refers to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind")]
pub enum Patient {
    /// A patient not yet known to the system.
    #[serde(rename = "new")]
    New {
        #[serde(rename = "firstName")]
        #[schema(value_type = String, min_length = 1)]
        first_name: NonEmptyText,
        #[serde(rename = "lastName")]
        #[schema(value_type = String, min_length = 1)]
        last_name: NonEmptyText,
    },
    /// A patient referenced by an existing identifier.
    #[serde(rename = "existing")]
    Existing {
        #[serde(rename = "patientId")]
        #[schema(value_type = String, min_length = 1)]
        patient_id: NonEmptyText,
    },
}

impl Patient {
    /// The discriminator value for this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Patient::New { .. } => NEW_PATIENT_KIND,
            Patient::Existing { .. } => EXISTING_PATIENT_KIND,
        }
    }
}

/// A validated order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub patient: Patient,
}

impl Order {
    /// Validate a decoded JSON body and build an `Order` from it.
    ///
    /// # Errors
    /// Returns a `ValidationError` if the body is not an object, or the `patient` field fails
    /// [`PATIENT_UNION`].
    pub fn from_value(value: &Value) -> ValidationResult<Self> {
        let root = FieldPath::root();
        let Some(body) = value.as_object() else {
            return Err(FieldViolation::is_object(&root.child(BODY_FIELD)).into());
        };

        let patient_path = root.child(PATIENT_FIELD);
        let validated = PATIENT_UNION.validate(body.get(PATIENT_FIELD), &patient_path)?;

        // The union check above covers everything serde enforces here, so a decode failure
        // means the schema and the enum have drifted apart.
        let patient: Patient = serde_json::from_value(Value::Object(validated.fields.clone()))
            .map_err(|e| {
                tracing::error!(kind = validated.tag, "patient schema/model mismatch: {e}");
                FieldViolation::is_object(&patient_path)
            })?;

        Ok(Self { patient })
    }

    /// Parse and validate a JSON document.
    ///
    /// # Errors
    /// Malformed JSON is reported as an `isObject` violation on `body`; otherwise see
    /// [`Order::from_value`].
    pub fn from_json_str(input: &str) -> ValidationResult<Self> {
        let value: Value = serde_json::from_str(input).map_err(|e| {
            tracing::debug!("order body is not valid JSON: {e}");
            FieldViolation::is_object(&FieldPath::root().child(BODY_FIELD))
        })?;
        Self::from_value(&value)
    }
}

/// Produce the acknowledgement string for a validated order.
pub fn acknowledge(order: &Order) -> String {
    tracing::debug!(kind = order.patient.kind(), "acknowledging order");
    match &order.patient {
        Patient::New {
            first_name,
            last_name,
        } => format!("New patient: {first_name} {last_name}"),
        Patient::Existing { patient_id } => format!("Existing patient: {patient_id}"),
    }
}
