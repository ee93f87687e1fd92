//! Record creation outcomes and registry endpoint routing

use serde_json::Value;

/// The four record kinds the registry accepts, each behind its own
/// collection endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    Program,
    Enrollment,
    Statistics,
    Graduate,
}

impl RecordType {
    /// Collection path segment under the API base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            RecordType::Program => "programs",
            RecordType::Enrollment => "enrollments",
            RecordType::Statistics => "program-statistics",
            RecordType::Graduate => "graduates",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordType::Program => "program",
            RecordType::Enrollment => "enrollment",
            RecordType::Statistics => "statistics",
            RecordType::Graduate => "graduate",
        }
    }
}

/// What the registry did with one submitted record.
///
/// A rejection is a normal per-record outcome, not an error: the run
/// continues past it. Transport-level problems are errors and never show
/// up here.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created {
        /// Server-assigned id, when the response body carries one
        id: Option<String>,
    },
    Rejected {
        reason: String,
    },
}

/// Flatten a structured validation response body into one readable line.
///
/// The registry's 422 bodies carry an `errors` map of field name to message
/// list; each field/message pair becomes `field: message`, joined with
/// semicolons. Bodies without the map fall back to their `message` field or
/// a generic line.
pub fn flatten_validation_errors(body: &Value) -> String {
    if let Some(errors) = body.get("errors").and_then(Value::as_object) {
        let mut parts = Vec::new();
        for (field, messages) in errors {
            match messages {
                Value::Array(list) => {
                    for message in list {
                        parts.push(format!("{}: {}", field, message.as_str().unwrap_or("invalid")));
                    }
                }
                Value::String(message) => parts.push(format!("{}: {}", field, message)),
                _ => parts.push(format!("{}: invalid", field)),
            }
        }
        if !parts.is_empty() {
            return parts.join("; ");
        }
    }

    body.get("message")
        .and_then(Value::as_str)
        .unwrap_or("validation failed")
        .to_string()
}

/// Pull the created record's id out of a success body. Registries disagree
/// on shape: `id` at the top level or under `data`, as a string or a number.
pub fn extract_created_id(body: &Value) -> Option<String> {
    let id = body.get("id").or_else(|| body.get("data")?.get("id"))?;
    match id {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoints() {
        assert_eq!(RecordType::Program.endpoint(), "programs");
        assert_eq!(RecordType::Enrollment.endpoint(), "enrollments");
        assert_eq!(RecordType::Statistics.endpoint(), "program-statistics");
        assert_eq!(RecordType::Graduate.endpoint(), "graduates");
    }

    #[test]
    fn test_flatten_errors_map() {
        let body = json!({
            "message": "The given data was invalid.",
            "errors": {
                "program_name": ["required"],
                "tuition_per_unit": ["must be a number", "must be positive"]
            }
        });
        assert_eq!(
            flatten_validation_errors(&body),
            "program_name: required; tuition_per_unit: must be a number; tuition_per_unit: must be positive"
        );
    }

    #[test]
    fn test_flatten_falls_back_to_message() {
        let body = json!({ "message": "The given data was invalid." });
        assert_eq!(flatten_validation_errors(&body), "The given data was invalid.");
        assert_eq!(flatten_validation_errors(&json!({})), "validation failed");
    }

    #[test]
    fn test_extract_created_id_shapes() {
        assert_eq!(
            extract_created_id(&json!({"id": "abc-123"})),
            Some("abc-123".to_string())
        );
        assert_eq!(
            extract_created_id(&json!({"id": 42})),
            Some("42".to_string())
        );
        assert_eq!(
            extract_created_id(&json!({"data": {"id": 7}})),
            Some("7".to_string())
        );
        assert_eq!(extract_created_id(&json!({"ok": true})), None);
    }
}
