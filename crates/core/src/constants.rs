//! Wire-level field names and discriminator values for order payloads.

/// Field on the order that carries the patient union.
pub const PATIENT_FIELD: &str = "patient";

/// Discriminator field inside the patient union.
pub const KIND_FIELD: &str = "kind";

pub const NEW_PATIENT_KIND: &str = "new";
pub const EXISTING_PATIENT_KIND: &str = "existing";

pub const FIRST_NAME_FIELD: &str = "firstName";
pub const LAST_NAME_FIELD: &str = "lastName";
pub const PATIENT_ID_FIELD: &str = "patientId";

/// Pseudo-field used when the request body itself is unusable.
pub const BODY_FIELD: &str = "body";
