pub mod base;
pub mod docs;
pub mod engine;
pub mod ingest;
pub mod stages;

use crate::utils::error::{BridgeError, Result};
use actix_web::HttpResponse;
use serde_json::Value;

pub(crate) fn timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

/// 解析請求本文；空白本文視為沒有資料，任何合法 JSON 值都接受
pub(crate) fn parse_json_body(body: &[u8]) -> Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(no_data());
    }

    serde_json::from_slice(body).map_err(|e| BridgeError::BadRequest {
        message: format!("Invalid JSON body: {}", e),
    })
}

/// Like [`parse_json_body`] but the payload must be a JSON object.
pub(crate) fn parse_json_object(body: &[u8]) -> Result<serde_json::Map<String, Value>> {
    into_object(parse_json_body(body)?)
}

/// 匯入端點要求實際資料：null、空物件、空陣列、空字串、0 與 false 都算沒有資料
pub(crate) fn parse_ingest_payload(body: &[u8]) -> Result<serde_json::Map<String, Value>> {
    let value = parse_json_body(body)?;
    let empty = match &value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    };
    if empty {
        return Err(no_data());
    }
    into_object(value)
}

fn into_object(value: Value) -> Result<serde_json::Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(BridgeError::BadRequest {
            message: "Expected a JSON object".to_string(),
        }),
    }
}

/// Size of `records`: items of a list, keys of an object, characters of a string.
pub(crate) fn records_len(payload: &serde_json::Map<String, Value>) -> Result<usize> {
    match payload.get("records") {
        None => Ok(0),
        Some(Value::Array(items)) => Ok(items.len()),
        Some(Value::Object(map)) => Ok(map.len()),
        Some(Value::String(s)) => Ok(s.chars().count()),
        Some(other) => Err(BridgeError::BadRequest {
            message: format!("records has no length: {}", other),
        }),
    }
}

/// 欄位存在就原樣回傳（包括 null），缺少時使用預設字串
pub(crate) fn echo_field(payload: &serde_json::Map<String, Value>, key: &str, default: &str) -> Value {
    payload
        .get(key)
        .cloned()
        .unwrap_or_else(|| Value::String(default.to_string()))
}

pub(crate) async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(serde_json::json!({ "error": "Method not allowed" }))
}

fn no_data() -> BridgeError {
    BridgeError::BadRequest {
        message: "No data provided".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_body_accepts_any_json_value() {
        let bodies: [&[u8]; 4] = [b"null", b"{}", b"[]", b"0"];
        for body in bodies {
            assert!(parse_json_body(body).is_ok(), "{:?}", body);
        }
        assert!(parse_json_object(b"{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_json_body_rejects_blank_and_malformed() {
        let bodies: [&[u8]; 2] = [b"", b"  "];
        for body in bodies {
            match parse_json_body(body) {
                Err(BridgeError::BadRequest { message }) => assert_eq!(message, "No data provided"),
                other => panic!("unexpected result for {:?}: {other:?}", body),
            }
        }
        assert!(parse_json_body(b"{oops").is_err());
    }

    #[test]
    fn test_ingest_payload_rejects_falsy_values() {
        let bodies: [&[u8]; 8] = [b"", b"null", b"{}", b"[]", b"\"\"", b"0", b"false", b"  "];
        for body in bodies {
            match parse_ingest_payload(body) {
                Err(BridgeError::BadRequest { message }) => assert_eq!(message, "No data provided"),
                other => panic!("unexpected result for {:?}: {other:?}", body),
            }
        }
        assert!(parse_ingest_payload(br#"{"records": []}"#).is_ok());
        assert!(parse_ingest_payload(b"[1]").is_err());
    }

    #[test]
    fn test_parse_json_object() {
        assert!(parse_json_object(br#"{"records": [1, 2]}"#).is_ok());
        assert!(parse_json_object(b"[1]").is_err());
        assert!(parse_json_object(b"{oops").is_err());
    }

    #[test]
    fn test_field_helpers() {
        let payload = parse_json_object(
            br#"{"records": [1, 2, 3], "source": "pmu", "race_id": 7, "dataset": null}"#,
        )
        .unwrap();
        assert_eq!(records_len(&payload).unwrap(), 3);
        assert_eq!(echo_field(&payload, "source", "unknown"), "pmu");
        assert_eq!(echo_field(&payload, "race_id", "unknown"), 7);
        assert_eq!(echo_field(&payload, "dataset", "unknown"), Value::Null);
        assert_eq!(echo_field(&payload, "type", "psi"), "psi");
    }

    #[test]
    fn test_records_len_counts_like_len() {
        let objects = parse_json_object(br#"{"records": {"a": 1, "b": 2}}"#).unwrap();
        assert_eq!(records_len(&objects).unwrap(), 2);

        let text = parse_json_object(br#"{"records": "abc"}"#).unwrap();
        assert_eq!(records_len(&text).unwrap(), 3);

        let missing = parse_json_object(br#"{"source": "pmu"}"#).unwrap();
        assert_eq!(records_len(&missing).unwrap(), 0);

        let number = parse_json_object(br#"{"records": 5}"#).unwrap();
        assert!(records_len(&number).is_err());
    }
}
