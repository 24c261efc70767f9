//! Request validation and normalization.
//!
//! Inbound bodies and path keys are checked against the [`Entity`] field
//! descriptors before any store call. A successful check yields a
//! [`Validated`] record or an [`EntityKey`]; those are the only inputs the
//! write paths of [`crate::service::EntityService`] accept.
//!
//! Rules per field kind:
//! - key: required, non-empty after trim
//! - text: trimmed, HTML-escaped; absent or null writes NULL
//! - decimal: JSON number or decimal string; absent or null writes NULL
//! - integer: JSON integer or integer string
//! - date: `YYYY-MM-DD`, must be a real calendar date

use std::marker::PhantomData;

use chrono::NaiveDate;
use orders_storage::{Entity, Field, FieldKind, Value};
use serde_json::Value as Json;

use crate::error::ApiError;
use crate::schema::validation::FieldError;

/// A full attribute set for one `E` row, in `E::FIELDS` order.
#[derive(Debug)]
pub struct Validated<E> {
    values: Vec<Value>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Validated<E> {
    fn clone(&self) -> Self {
        Validated {
            values: self.values.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> Validated<E> {
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// A normalized path key for `E`.
#[derive(Debug)]
pub struct EntityKey<E> {
    value: Value,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> EntityKey<E> {
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

/// Parses and validates a request body for `E`.
///
/// An empty body is treated as `{}`, so it fails on the missing key rather
/// than on JSON syntax. Unknown fields are ignored. Every failing field is
/// reported, not only the first.
pub fn record<E: Entity>(body: &[u8]) -> Result<Validated<E>, ApiError> {
    let parsed: Json = if body.iter().all(u8::is_ascii_whitespace) {
        Json::Object(serde_json::Map::new())
    } else {
        serde_json::from_slice(body)
            .map_err(|e| ApiError::BadRequest(format!("malformed JSON body: {}", e)))?
    };

    let Json::Object(map) = parsed else {
        return Err(ApiError::ValidationFailed(vec![FieldError::new(
            "body",
            "must be a JSON object",
        )]));
    };

    let mut values = Vec::with_capacity(E::FIELDS.len());
    let mut errors = Vec::new();
    for field in E::FIELDS {
        let is_key = field.name == E::KEY.name;
        match normalize(field, map.get(field.name), is_key) {
            Ok(v) => values.push(v),
            Err(reason) => errors.push(FieldError::new(field.name, reason)),
        }
    }

    if !errors.is_empty() {
        return Err(ApiError::ValidationFailed(errors));
    }

    Ok(Validated {
        values,
        _entity: PhantomData,
    })
}

/// Normalizes a key taken from the request path with the same rule as a
/// body key, so a key written through the body can be addressed again.
pub fn path_key<E: Entity>(raw: &str) -> Result<EntityKey<E>, ApiError> {
    let value = normalize(&E::KEY, Some(&Json::String(raw.to_string())), true)
        .map_err(|reason| ApiError::ValidationFailed(vec![FieldError::new(E::KEY.name, reason)]))?;
    Ok(EntityKey {
        value,
        _entity: PhantomData,
    })
}

fn normalize(field: &Field, raw: Option<&Json>, required: bool) -> Result<Value, String> {
    let raw = match raw {
        None | Some(Json::Null) if required => return Err("is required".to_string()),
        None | Some(Json::Null) => return Ok(Value::Null),
        Some(v) => v,
    };

    match field.kind {
        FieldKind::Text => {
            let text = match raw {
                Json::String(s) => s.trim().to_string(),
                Json::Number(n) => n.to_string(),
                Json::Bool(b) => b.to_string(),
                _ => return Err("must be a string".to_string()),
            };
            if required && text.is_empty() {
                return Err("must not be empty".to_string());
            }
            Ok(Value::Text(escape(&text)))
        }
        FieldKind::Decimal => match raw {
            Json::Number(n) => n
                .as_f64()
                .map(Value::Real)
                .ok_or_else(|| "must be a decimal number".to_string()),
            Json::String(s) if is_decimal(s.trim()) => s
                .trim()
                .parse::<f64>()
                .map(Value::Real)
                .map_err(|_| "must be a decimal number".to_string()),
            _ => Err("must be a decimal number".to_string()),
        },
        FieldKind::Integer => match raw {
            Json::Number(n) => n
                .as_i64()
                .map(Value::Integer)
                .ok_or_else(|| "must be an integer".to_string()),
            Json::String(s) => {
                let s = s.trim();
                if required && s.is_empty() {
                    return Err("must not be empty".to_string());
                }
                s.parse::<i64>()
                    .map(Value::Integer)
                    .map_err(|_| "must be an integer".to_string())
            }
            _ => Err("must be an integer".to_string()),
        },
        FieldKind::Date => match raw {
            Json::String(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map(|d| Value::Text(d.format("%Y-%m-%d").to_string()))
                .map_err(|_| "must be a date in YYYY-MM-DD form".to_string()),
            _ => Err("must be a date in YYYY-MM-DD form".to_string()),
        },
    }
}

/// Replaces HTML-sensitive characters with entities.
///
/// Stored text keeps this exact mapping; existing rows were written with it.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// `[-+]?[0-9]*(\.[0-9]+)?` with at least one digit.
pub fn is_decimal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());

    match frac_part {
        Some(f) => all_digits(int_part) && !f.is_empty() && all_digits(f),
        None => !int_part.is_empty() && all_digits(int_part),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orders_storage::{Agent, Order};
    use proptest::prelude::*;
    use serde_json::json;

    fn body(v: Json) -> Vec<u8> {
        serde_json::to_vec(&v).unwrap()
    }

    fn field_errors(err: ApiError) -> Vec<FieldError> {
        match err {
            ApiError::ValidationFailed(errors) => errors,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn escape_replaces_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a> \ `"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;&#x2F;a&gt; &#x5C; &#96;"
        );
        assert_eq!(escape("plain text"), "plain text");
    }

    #[test]
    fn decimal_forms() {
        for ok in ["0.05", "10", "-3.5", "+2", ".5", "007"] {
            assert!(is_decimal(ok), "{ok} should be accepted");
        }
        for bad in ["", "abc", "1.", ".", "-", "1e5", "1.2.3", "0x10", " 1"] {
            assert!(!is_decimal(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn agent_body_is_trimmed_escaped_and_ordered() {
        let validated = record::<Agent>(&body(json!({
            "AGENT_CODE": "  A001 ",
            "AGENT_NAME": "Alpha & Sons",
            "COMMISSION": "0.05",
        })))
        .unwrap();
        assert_eq!(
            validated.into_values(),
            vec![
                Value::Text("A001".to_string()),
                Value::Text("Alpha &amp; Sons".to_string()),
                Value::Null,
                Value::Real(0.05),
                Value::Null,
                Value::Null,
            ]
        );
    }

    #[test]
    fn numeric_commission_is_accepted() {
        let validated = record::<Agent>(&body(json!({"AGENT_CODE": "A1", "COMMISSION": 0.1}))).unwrap();
        assert_eq!(validated.into_values()[3], Value::Real(0.1));
    }

    #[test]
    fn missing_and_blank_keys_are_rejected() {
        let errors = field_errors(record::<Agent>(&body(json!({"AGENT_NAME": "x"}))).unwrap_err());
        assert_eq!(errors, vec![FieldError::new("AGENT_CODE", "is required")]);

        let errors = field_errors(record::<Agent>(&body(json!({"AGENT_CODE": "   "}))).unwrap_err());
        assert_eq!(errors, vec![FieldError::new("AGENT_CODE", "must not be empty")]);
    }

    #[test]
    fn every_failing_field_is_reported() {
        let errors = field_errors(
            record::<Agent>(&body(json!({"COMMISSION": "abc", "COUNTRY": ["x"]}))).unwrap_err(),
        );
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["AGENT_CODE", "COMMISSION", "COUNTRY"]);
    }

    #[test]
    fn empty_body_fails_on_key() {
        let errors = field_errors(record::<Agent>(b"").unwrap_err());
        assert_eq!(errors[0].field, "AGENT_CODE");
    }

    #[test]
    fn malformed_json_is_bad_request() {
        assert!(matches!(
            record::<Agent>(b"{not json").unwrap_err(),
            ApiError::BadRequest(_)
        ));
        let errors = field_errors(record::<Agent>(b"[1, 2]").unwrap_err());
        assert_eq!(errors[0].field, "body");
    }

    #[test]
    fn order_fields_are_typed() {
        let validated = record::<Order>(&body(json!({
            "ORD_NUM": "200100",
            "ORD_AMOUNT": 1000,
            "ORD_DATE": "2008-08-01",
        })))
        .unwrap();
        let values = validated.into_values();
        assert_eq!(values[0], Value::Integer(200100));
        assert_eq!(values[1], Value::Real(1000.0));
        assert_eq!(values[3], Value::Text("2008-08-01".to_string()));

        let errors = field_errors(
            record::<Order>(&body(json!({"ORD_NUM": 1.5, "ORD_DATE": "2008-02-30"}))).unwrap_err(),
        );
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["ORD_NUM", "ORD_DATE"]);
    }

    #[test]
    fn path_keys_follow_key_rules() {
        let key = path_key::<Agent>(" A&1 ").unwrap();
        assert_eq!(key.value(), &Value::Text("A&amp;1".to_string()));

        assert!(path_key::<Agent>("  ").is_err());
        assert_eq!(
            path_key::<Order>("200100").unwrap().into_value(),
            Value::Integer(200100)
        );
        assert!(path_key::<Order>("abc").is_err());
    }

    proptest! {
        #[test]
        fn escaped_text_has_no_raw_markup(s in ".*") {
            let escaped = escape(&s);
            for c in ['<', '>', '"', '\'', '/', '\\', '`'] {
                prop_assert!(!escaped.contains(c));
            }
        }

        #[test]
        fn formatted_decimals_are_accepted(x in -1.0e9f64..1.0e9f64) {
            let s = format!("{:.4}", x);
            prop_assert!(is_decimal(&s));
        }

        #[test]
        fn letters_are_never_decimal(s in "[a-zA-Z]+") {
            prop_assert!(!is_decimal(&s));
        }
    }
}
