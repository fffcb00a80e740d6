/*
 * Responsibility
 * - The response wrapper shared by every JSON route: { success, message?, error?, data? }
 * - `error` carries a stable code, never a driver message
 */
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
            data: Some(data),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
            data: None,
        }
    }

    pub fn failure(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            error: Some(code),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_fields_are_omitted() {
        let ok = serde_json::to_value(Envelope::ok("got it", vec![1, 2])).unwrap();
        assert_eq!(ok, json!({"success": true, "message": "got it", "data": [1, 2]}));

        let msg = serde_json::to_value(Envelope::<()>::message("done")).unwrap();
        assert_eq!(msg, json!({"success": true, "message": "done"}));

        let err = serde_json::to_value(Envelope::<()>::failure("NOT_FOUND", "bag not found.")).unwrap();
        assert_eq!(
            err,
            json!({"success": false, "error": "NOT_FOUND", "message": "bag not found."})
        );
    }
}
