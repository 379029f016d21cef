//!
//! # Input Validation
//!
//! Declarative, schema-driven validation of untyped JSON input. Each request
//! shape is described by a [`Schema`]: an ordered list of field rules
//! (type, required/optional, trim, emptiness, minimum length, enum
//! membership, id shape). One generic routine, [`validate`], interprets a
//! schema against a `serde_json::Value` and either returns the normalized
//! (trimmed) object or fails with a 400 carrying every violation found.
//!
//! Violations are collected across all fields before failing, never
//! fail-fast on the first field. `details` is the list of per-field message
//! lists in schema order; fields without violations are omitted. A value of
//! the wrong JSON type produces the single type message for that field and
//! skips its remaining constraints. Optional fields that are absent skip all
//! checks. Trimming is a normalization applied before the emptiness and
//! length checks, and the trimmed value is what reaches the typed struct.

use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::error::AppError;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// The JSON type (and type-level constraint) expected for a field.
#[derive(Debug, Clone, Copy)]
pub enum Kind {
    /// A JSON string.
    Str,
    /// A JSON boolean.
    Bool,
    /// A string with valid email syntax.
    Email,
    /// A string holding a well-formed UUID.
    Id,
    /// A string drawn from a fixed set of values.
    Enum(&'static [&'static str]),
}

/// A single field rule inside a [`Schema`].
#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub kind: Kind,
    pub required: bool,
    /// Strip surrounding whitespace before the emptiness/length checks.
    pub trim: bool,
    pub not_empty: bool,
    pub min_len: Option<usize>,
}

impl Field {
    const fn new(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            required: true,
            trim: false,
            not_empty: false,
            min_len: None,
        }
    }

    const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    const fn trimmed(mut self) -> Self {
        self.trim = true;
        self
    }

    const fn not_empty(mut self) -> Self {
        self.not_empty = true;
        self
    }

    const fn min_len(mut self, n: usize) -> Self {
        self.min_len = Some(n);
        self
    }
}

/// An ordered set of field rules describing one request shape.
#[derive(Debug)]
pub struct Schema {
    pub fields: &'static [Field],
}

/// `POST /users/register` body. Public registration only ever creates
/// regular accounts; admins are seeded through the CLI.
pub static REGISTER: Schema = Schema {
    fields: &[
        Field::new("firstName", Kind::Str).trimmed().not_empty().min_len(3),
        Field::new("lastName", Kind::Str).trimmed().not_empty().min_len(3),
        Field::new("email", Kind::Email),
        Field::new("password", Kind::Str).not_empty().min_len(6),
        Field::new("role", Kind::Enum(&["user"])),
    ],
};

/// `POST /users/login` body.
pub static LOGIN: Schema = Schema {
    fields: &[
        Field::new("email", Kind::Email),
        Field::new("password", Kind::Str).not_empty().min_len(6),
    ],
};

/// `PATCH /users/{id}` body.
pub static UPDATE_USER: Schema = Schema {
    fields: &[
        Field::new("firstName", Kind::Str).optional().trimmed().not_empty().min_len(3),
        Field::new("lastName", Kind::Str).optional().trimmed().not_empty().min_len(3),
        Field::new("password", Kind::Str).optional().not_empty().min_len(6),
    ],
};

/// `POST /tasks` body.
pub static CREATE_TASK: Schema = Schema {
    fields: &[
        Field::new("title", Kind::Str).trimmed().not_empty().min_len(3),
        Field::new("description", Kind::Str).trimmed().not_empty().min_len(3),
        Field::new("completed", Kind::Bool).optional(),
        Field::new("priority", Kind::Enum(&["low", "medium", "high"])).optional(),
    ],
};

/// `PATCH /tasks/{id}` body.
pub static UPDATE_TASK: Schema = Schema {
    fields: &[
        Field::new("title", Kind::Str).optional().trimmed().min_len(3),
        Field::new("description", Kind::Str).optional().trimmed(),
        Field::new("completed", Kind::Bool).optional(),
        Field::new("priority", Kind::Enum(&["low", "medium", "high"])).optional(),
    ],
};

/// The `{id}` path parameter of every per-resource route.
pub static RESOURCE_ID: Schema = Schema {
    fields: &[Field::new("id", Kind::Id)],
};

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// The message emitted when a value is missing or has the wrong JSON type.
fn type_message(field: &Field) -> String {
    match field.kind {
        Kind::Str => format!("{} must be a string", field.name),
        Kind::Bool => format!("{} must be a boolean value", field.name),
        Kind::Email => format!("{} must be an email", field.name),
        Kind::Id => format!("{} must be a UUID", field.name),
        Kind::Enum(values) => format!(
            "{} must be one of the following values: {}",
            capitalize(field.name),
            values.join(",")
        ),
    }
}

/// Checks a present value against one field rule. Returns the violation
/// messages and, when the value passes, its normalized form.
fn check_field(field: &Field, value: &Value) -> (Vec<String>, Option<Value>) {
    // Every kind except Bool expects a string carrier.
    let raw = match (&field.kind, value) {
        (Kind::Bool, Value::Bool(_)) => return (Vec::new(), Some(value.clone())),
        (Kind::Bool, _) => return (vec![type_message(field)], None),
        (_, Value::String(s)) => s.as_str(),
        (_, _) => return (vec![type_message(field)], None),
    };

    let normalized = if field.trim { raw.trim() } else { raw };
    let mut messages = Vec::new();

    match field.kind {
        Kind::Str => {
            if field.not_empty && normalized.is_empty() {
                messages.push(format!("{} should not be empty", field.name));
            }
            if let Some(min) = field.min_len {
                if normalized.chars().count() < min {
                    messages.push(format!(
                        "{} must be longer than or equal to {} characters",
                        field.name, min
                    ));
                }
            }
        }
        Kind::Email => {
            if !EMAIL_REGEX.is_match(normalized) {
                messages.push(type_message(field));
            }
        }
        Kind::Id => {
            if Uuid::parse_str(normalized).is_err() {
                messages.push(type_message(field));
            }
        }
        Kind::Enum(values) => {
            if !values.contains(&normalized) {
                messages.push(type_message(field));
            }
        }
        Kind::Bool => unreachable!("handled above"),
    }

    if messages.is_empty() {
        (Vec::new(), Some(Value::String(normalized.to_string())))
    } else {
        (messages, None)
    }
}

/// Interprets `schema` against `input`, collecting every violation.
///
/// On success returns the normalized object containing exactly the declared
/// fields that were present (trimmed where the schema says so); unknown
/// input fields are discarded.
pub fn validate(input: &Value, schema: &Schema) -> Result<Map<String, Value>, AppError> {
    let empty = Map::new();
    let object = input.as_object().unwrap_or(&empty);

    let mut normalized = Map::new();
    let mut details: Vec<Vec<String>> = Vec::new();

    for field in schema.fields {
        match object.get(field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    details.push(vec![type_message(field)]);
                }
            }
            Some(value) => {
                let (messages, value) = check_field(field, value);
                if !messages.is_empty() {
                    details.push(messages);
                } else if let Some(value) = value {
                    normalized.insert(field.name.to_string(), value);
                }
            }
        }
    }

    if details.is_empty() {
        Ok(normalized)
    } else {
        Err(AppError::validation(details))
    }
}

/// Validates `input` against `schema` and deserializes the normalized object
/// into the typed request struct.
pub fn validate_into<T: DeserializeOwned>(input: &Value, schema: &Schema) -> Result<T, AppError> {
    let normalized = validate(input, schema)?;
    serde_json::from_value(Value::Object(normalized))
        .map_err(|e| AppError::Internal(format!("validated input failed to deserialize: {}", e)))
}

/// Validates the shape of a path id parameter and parses it.
pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    let normalized = validate(&json!({ "id": raw }), &RESOURCE_ID)?;
    match normalized.get("id").and_then(Value::as_str) {
        Some(id) => Uuid::parse_str(id)
            .map_err(|e| AppError::Internal(format!("id re-parse failed: {}", e))),
        None => Err(AppError::Internal("id missing after validation".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateTaskInput, Priority, RegisterInput, Role, UpdateTaskInput};
    use pretty_assertions::assert_eq;

    fn details_of(result: Result<Map<String, Value>, AppError>) -> Vec<Vec<String>> {
        match result {
            Err(AppError::Validation { details, .. }) => details,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_type_and_short_field_collect_together() {
        // Both violations are reported in schema order, one list per field.
        let input = json!({ "title": 55, "description": "t" });
        let details = details_of(validate(&input, &CREATE_TASK));
        assert_eq!(
            details,
            vec![
                vec!["title must be a string".to_string()],
                vec!["description must be longer than or equal to 3 characters".to_string()],
            ]
        );
    }

    #[test]
    fn test_missing_required_fields_fail_with_type_message() {
        let details = details_of(validate(&json!({}), &LOGIN));
        assert_eq!(
            details,
            vec![
                vec!["email must be an email".to_string()],
                vec!["password must be a string".to_string()],
            ]
        );
    }

    #[test]
    fn test_empty_string_reports_emptiness_and_length() {
        let input = json!({
            "title": "   ",
            "description": "long enough",
            "completed": false
        });
        let details = details_of(validate(&input, &CREATE_TASK));
        assert_eq!(
            details,
            vec![vec![
                "title should not be empty".to_string(),
                "title must be longer than or equal to 3 characters".to_string(),
            ]]
        );
    }

    #[test]
    fn test_trimming_happens_before_length_check_and_is_kept() {
        let input = json!({ "title": "  abc  ", "description": "  something  " });
        let normalized = validate(&input, &CREATE_TASK).unwrap();
        assert_eq!(normalized["title"], "abc");
        assert_eq!(normalized["description"], "something");
    }

    #[test]
    fn test_optional_fields_absent_skip_all_checks() {
        let input = json!({ "title": "abc", "description": "def" });
        assert!(validate(&input, &CREATE_TASK).is_ok());
        // Empty update body is valid: every field is optional.
        assert!(validate(&json!({}), &UPDATE_TASK).is_ok());
    }

    #[test]
    fn test_optional_fields_present_are_fully_checked() {
        let input = json!({ "completed": "yes" });
        let details = details_of(validate(&input, &UPDATE_TASK));
        assert_eq!(details, vec![vec!["completed must be a boolean value".to_string()]]);
    }

    #[test]
    fn test_enum_membership_messages() {
        let input = json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "password": "secret123",
            "role": "admin"
        });
        let details = details_of(validate(&input, &REGISTER));
        assert_eq!(
            details,
            vec![vec!["Role must be one of the following values: user".to_string()]]
        );

        let input = json!({ "title": "abc", "description": "def", "priority": "urgent" });
        let details = details_of(validate(&input, &CREATE_TASK));
        assert_eq!(
            details,
            vec![vec![
                "Priority must be one of the following values: low,medium,high".to_string()
            ]]
        );
    }

    #[test]
    fn test_email_syntax() {
        let bad = json!({ "email": "not-an-email", "password": "secret123" });
        let details = details_of(validate(&bad, &LOGIN));
        assert_eq!(details, vec![vec!["email must be an email".to_string()]]);

        let good = json!({ "email": "a@b.co", "password": "secret123" });
        assert!(validate(&good, &LOGIN).is_ok());
    }

    #[test]
    fn test_non_object_input_fails_every_required_field() {
        let details = details_of(validate(&json!("nope"), &LOGIN));
        assert_eq!(details.len(), 2);
    }

    #[test]
    fn test_validate_into_register_input() {
        let input = json!({
            "firstName": "  Ada ",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "password": "secret123",
            "role": "user"
        });
        let parsed: RegisterInput = validate_into(&input, &REGISTER).unwrap();
        assert_eq!(parsed.first_name, "Ada");
        assert_eq!(parsed.role, Role::User);
    }

    #[test]
    fn test_validate_into_task_inputs() {
        let input = json!({ "title": "abc", "description": "def", "priority": "high" });
        let parsed: CreateTaskInput = validate_into(&input, &CREATE_TASK).unwrap();
        assert_eq!(parsed.priority, Some(Priority::High));
        assert_eq!(parsed.completed, None);

        let parsed: UpdateTaskInput = validate_into(&json!({ "completed": true }), &UPDATE_TASK).unwrap();
        assert_eq!(parsed.completed, Some(true));
        assert!(parsed.title.is_none());
    }

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);

        match parse_id("6568f7ad8f8c8d0aa1b2c3d4e5") {
            Err(AppError::Validation { details, .. }) => {
                assert_eq!(details, vec![vec!["id must be a UUID".to_string()]]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
