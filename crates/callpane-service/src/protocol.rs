//! JSON-lines wire format of the stdio transport
//!
//! Requests, one per line:
//! ```text
//! {"id":7,"method":"add","args":[2,3]}
//! ```
//! Responses carry the same id and one of `result` (a bare value),
//! `results` (a sequence) or `error` (a string or `{"message": ...}`).

use serde::Serialize;
use serde_json::Value;

use super::commands::Outcome;
use super::proxy::Reply;

/// Reserved method returning the interface description text
pub const INTERFACE_METHOD: &str = "__interface";

#[derive(Debug, Serialize)]
struct Request<'a> {
    id: u64,
    method: &'a str,
    args: &'a [Value],
}

/// Serialize a request line (without the trailing newline)
pub fn build_request(id: u64, method: &str, args: &[Value]) -> String {
    let request = Request { id, method, args };
    serde_json::to_string(&request).unwrap_or_else(|_| {
        serde_json::json!({ "id": id, "method": method, "args": [] }).to_string()
    })
}

/// A parsed response line
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub id: u64,
    pub outcome: Outcome,
}

/// Parse one line of service stdout
///
/// Returns `None` for lines that are not responses; services are free to
/// print other output.
pub fn parse_response(line: &str) -> Option<Response> {
    let value: Value = serde_json::from_str(line.trim()).ok()?;
    let obj = value.as_object()?;
    let id = obj.get("id")?.as_u64()?;

    // `"error": null` is a success
    let outcome = if let Some(error) = obj.get("error").filter(|e| !e.is_null()) {
        Err(error_message(error))
    } else if let Some(Value::Array(results)) = obj.get("results") {
        Ok(Reply::Many(results.clone()))
    } else if let Some(result) = obj.get("result") {
        Ok(Reply::Single(result.clone()))
    } else {
        Ok(Reply::empty())
    };

    Some(Response { id, outcome })
}

fn error_message(error: &Value) -> String {
    match error {
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("message") {
            Some(Value::String(s)) => s.clone(),
            _ => error.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_request() {
        let line = build_request(7, "add", &[json!(2), json!(3)]);
        assert_eq!(line, r#"{"id":7,"method":"add","args":[2,3]}"#);
    }

    #[test]
    fn test_parse_bare_result() {
        let resp = parse_response(r#"{"id": 7, "result": 5}"#).unwrap();
        assert_eq!(resp.id, 7);
        assert_eq!(resp.outcome, Ok(Reply::Single(json!(5))));
    }

    #[test]
    fn test_parse_null_result_is_a_value() {
        let resp = parse_response(r#"{"id": 1, "result": null}"#).unwrap();
        assert_eq!(resp.outcome, Ok(Reply::Single(Value::Null)));
    }

    #[test]
    fn test_parse_results_sequence() {
        let resp = parse_response(r#"{"id": 2, "results": [1, "a"]}"#).unwrap();
        assert_eq!(resp.outcome, Ok(Reply::Many(vec![json!(1), json!("a")])));
    }

    #[test]
    fn test_parse_missing_result_is_empty() {
        let resp = parse_response(r#"{"id": 3}"#).unwrap();
        assert_eq!(resp.outcome, Ok(Reply::empty()));
    }

    #[test]
    fn test_parse_error_forms() {
        let resp = parse_response(r#"{"id": 4, "error": {"message": "boom"}}"#).unwrap();
        assert_eq!(resp.outcome, Err("boom".to_string()));

        let resp = parse_response(r#"{"id": 5, "error": "bad"}"#).unwrap();
        assert_eq!(resp.outcome, Err("bad".to_string()));

        let resp = parse_response(r#"{"id": 6, "error": {"code": 3}}"#).unwrap();
        assert_eq!(resp.outcome, Err(r#"{"code":3}"#.to_string()));
    }

    #[test]
    fn test_null_error_is_not_a_failure() {
        let response = parse_response(r#"{"id": 1, "result": 5, "error": null}"#).unwrap();
        assert_eq!(response.outcome, Ok(Reply::Single(json!(5))));

        let response = parse_response(r#"{"id": 2, "error": null}"#).unwrap();
        assert_eq!(response.outcome, Ok(Reply::empty()));
    }

    #[test]
    fn test_non_response_lines_are_ignored() {
        assert!(parse_response("listening on stdin").is_none());
        assert!(parse_response(r#"{"method": "x"}"#).is_none());
        assert!(parse_response("[1, 2]").is_none());
    }
}
