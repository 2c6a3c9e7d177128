//! # Request Validation
//!
//! Declarative per-route validation chains.
//!
//! A [`ValidationChain`] is an ordered list of [`FieldCheck`]s, each naming
//! where the value lives (path parameter or body field), which field, the
//! [`Rule`] it must satisfy and the message reported when it does not.
//!
//! Semantics:
//! - Every check in the chain runs, in declaration order
//! - Failures accumulate; nothing short-circuits
//! - A non-empty failure list rejects the request with 400 before the
//!   handler is reached
//!
//! The [`Validated`] extractor is the gate: it gathers the request input,
//! runs the route's chain and only then converts the input to the typed
//! value the handler receives.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::errors::ApiError;

/// Where a checked value is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// Path parameter (`/:id`)
    Params,
    /// JSON body field
    Body,
}

/// Predicate applied to a single value.
///
/// `None` means the field was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Signed integer without leading zeros that fits in an `i64`
    IsInt,
    /// Present, not null, and non-empty once stringified
    NotEmpty,
    /// JSON number or decimal string
    IsNumeric,
    /// Numeric and strictly greater than zero
    Positive,
    /// Boolean, or one of `"true"`, `"false"`, `"1"`, `"0"`, `1`, `0`
    IsBoolean,
}

impl Rule {
    /// Returns whether `value` satisfies this rule
    pub fn check(&self, value: Option<&Value>) -> bool {
        let Some(value) = value else {
            return false;
        };

        match self {
            Rule::IsInt => as_int(value).is_some(),
            Rule::NotEmpty => as_text(value).is_some_and(|text| !text.is_empty()),
            Rule::IsNumeric => as_number(value).is_some(),
            Rule::Positive => as_number(value).is_some_and(|n| n > 0.0),
            Rule::IsBoolean => as_bool(value).is_some(),
        }
    }
}

/// One entry in a validation chain
#[derive(Debug, Clone)]
pub struct FieldCheck {
    pub location: Location,
    pub field: &'static str,
    pub rule: Rule,
    pub message: &'static str,
}

/// Ordered list of checks for one route
#[derive(Debug, Clone, Default)]
pub struct ValidationChain {
    checks: Vec<FieldCheck>,
}

impl ValidationChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a check on a path parameter
    pub fn param(self, field: &'static str, rule: Rule, message: &'static str) -> Self {
        self.check(Location::Params, field, rule, message)
    }

    /// Append a check on a body field
    pub fn body(self, field: &'static str, rule: Rule, message: &'static str) -> Self {
        self.check(Location::Body, field, rule, message)
    }

    fn check(
        mut self,
        location: Location,
        field: &'static str,
        rule: Rule,
        message: &'static str,
    ) -> Self {
        self.checks.push(FieldCheck {
            location,
            field,
            rule,
            message,
        });
        self
    }

    /// The checks, in the order they run
    pub fn checks(&self) -> &[FieldCheck] {
        &self.checks
    }

    /// Whether any check reads the request body
    pub fn reads_body(&self) -> bool {
        self.checks.iter().any(|c| c.location == Location::Body)
    }

    /// Run every check against `input`, collecting all failures
    pub fn run(&self, input: &RequestInput) -> Result<(), ValidationErrors> {
        let errors: Vec<FieldError> = self
            .checks
            .iter()
            .filter_map(|check| {
                let value = input.get(check.location, check.field);
                if check.rule.check(value.as_ref()) {
                    None
                } else {
                    Some(FieldError {
                        kind: "field",
                        location: check.location,
                        field: check.field.to_string(),
                        message: check.message.to_string(),
                        value,
                    })
                }
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors })
        }
    }
}

/// A single failed check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub location: Location,
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl FieldError {
    /// Body that is not a JSON object
    pub fn malformed_body() -> Self {
        Self {
            kind: "field",
            location: Location::Body,
            field: "body".to_string(),
            message: "Invalid JSON body".to_string(),
            value: None,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Accumulated failures, serialized as `{ "errors": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Error)]
#[error("{} invalid field(s)", .errors.len())]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn single(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Field names in failure order
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }
}

/// Raw request values that validation chains inspect
#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    params: HashMap<String, String>,
    body: Map<String, Value>,
}

impl RequestInput {
    pub fn new(params: HashMap<String, String>, body: Map<String, Value>) -> Self {
        Self { params, body }
    }

    /// Parse a raw body. Empty means `{}`; anything but a JSON object is
    /// rejected.
    pub fn parse_body(bytes: &[u8]) -> Result<Map<String, Value>, ValidationErrors> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }

        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Ok(map),
            _ => Err(ValidationErrors::single(FieldError::malformed_body())),
        }
    }

    /// Look a value up by location
    pub fn get(&self, location: Location, field: &str) -> Option<Value> {
        match location {
            Location::Params => self.params.get(field).cloned().map(Value::String),
            Location::Body => self.body.get(field).cloned(),
        }
    }

    pub fn param_int(&self, field: &str) -> Option<i64> {
        self.params.get(field).and_then(|s| parse_int(s))
    }

    pub fn body_text(&self, field: &str) -> Option<String> {
        self.body.get(field).and_then(as_text)
    }

    pub fn body_number(&self, field: &str) -> Option<f64> {
        self.body.get(field).and_then(as_number)
    }

    pub fn body_bool(&self, field: &str) -> Option<bool> {
        self.body.get(field).and_then(as_bool)
    }
}

/// Typed handler input produced once a route's chain passes
pub trait RouteInput: Sized {
    /// Checks run before conversion
    fn chain() -> ValidationChain;

    /// Convert validated input. Returning `None` is treated as a malformed
    /// request.
    fn from_input(input: &RequestInput) -> Option<Self>;
}

/// Extractor that validates before the handler runs
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: RouteInput + Send,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let chain = T::chain();
        let (mut parts, body) = req.into_parts();

        // Routes without parameters have nothing to extract.
        let params = Path::<HashMap<String, String>>::from_request_parts(&mut parts, state)
            .await
            .map(|Path(params)| params)
            .unwrap_or_default();

        // Only JSON bodies are read; anything else counts as an empty object.
        let body = if chain.reads_body() && is_json_content_type(&parts.headers) {
            let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
                .await
                .map_err(IntoResponse::into_response)?;
            RequestInput::parse_body(&bytes).map_err(reject)?
        } else {
            Map::new()
        };

        let input = RequestInput::new(params, body);
        chain.run(&input).map_err(reject)?;

        T::from_input(&input)
            .map(Validated)
            .ok_or_else(|| reject(ValidationErrors::single(FieldError::malformed_body())))
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

fn reject(errors: ValidationErrors) -> Response {
    ApiError::Validation(errors).into_response()
}

// ==================
// Value coercion
// ==================

fn int_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[-+]?(0|[1-9][0-9]*)$").expect("valid int pattern"))
}

fn numeric_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").expect("valid numeric pattern"))
}

fn parse_int(s: &str) -> Option<i64> {
    if !int_pattern().is_match(s) {
        return None;
    }
    s.trim_start_matches('+').parse().ok()
}

fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => parse_int(s),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) if numeric_pattern().is_match(s) => {
            s.parse().ok().filter(|f: &f64| f.is_finite())
        }
        _ => None,
    }
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    fn body(value: Value) -> RequestInput {
        let map = match value {
            Value::Object(map) => map,
            _ => panic!("body must be an object"),
        };
        RequestInput::new(HashMap::new(), map)
    }

    fn id(raw: &str) -> RequestInput {
        let mut params = HashMap::new();
        params.insert("id".to_string(), raw.to_string());
        RequestInput::new(params, Map::new())
    }

    #[test]
    fn test_is_int() {
        for ok in ["0", "1", "42", "-7", "+3"] {
            assert!(Rule::IsInt.check(Some(&json!(ok))), "{ok} should pass");
        }
        for bad in ["", "abc", "1.5", "01", "1e3", " 1", "99999999999999999999"] {
            assert!(!Rule::IsInt.check(Some(&json!(bad))), "{bad} should fail");
        }
        assert!(!Rule::IsInt.check(None));
    }

    #[test]
    fn test_not_empty() {
        assert!(Rule::NotEmpty.check(Some(&json!("Monitor"))));
        assert!(Rule::NotEmpty.check(Some(&json!(5))));
        assert!(!Rule::NotEmpty.check(Some(&json!(""))));
        assert!(!Rule::NotEmpty.check(Some(&Value::Null)));
        assert!(!Rule::NotEmpty.check(Some(&json!(["a"]))));
        assert!(!Rule::NotEmpty.check(None));
    }

    #[test]
    fn test_numeric_and_positive() {
        assert!(Rule::IsNumeric.check(Some(&json!(300))));
        assert!(Rule::IsNumeric.check(Some(&json!("19.99"))));
        assert!(Rule::IsNumeric.check(Some(&json!("-5"))));
        assert!(!Rule::IsNumeric.check(Some(&json!("abc"))));
        assert!(!Rule::IsNumeric.check(Some(&json!(""))));
        assert!(!Rule::IsNumeric.check(Some(&json!(true))));

        assert!(Rule::Positive.check(Some(&json!(0.01))));
        assert!(Rule::Positive.check(Some(&json!("10"))));
        assert!(!Rule::Positive.check(Some(&json!(0))));
        assert!(!Rule::Positive.check(Some(&json!(-1))));
        assert!(!Rule::Positive.check(Some(&json!("abc"))));

        // Too large for f64; must not come back as infinity.
        let huge = json!(format!("1{}", "0".repeat(400)));
        assert!(!Rule::IsNumeric.check(Some(&huge)));
        assert!(!Rule::Positive.check(Some(&huge)));
    }

    #[test]
    fn test_json_content_type() {
        let mut headers = HeaderMap::new();
        assert!(!is_json_content_type(&headers));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert!(is_json_content_type(&headers));

        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("Application/JSON; charset=utf-8"),
        );
        assert!(is_json_content_type(&headers));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(!is_json_content_type(&headers));
    }

    #[test]
    fn test_is_boolean() {
        for ok in [json!(true), json!(false), json!("true"), json!("0"), json!(1)] {
            assert!(Rule::IsBoolean.check(Some(&ok)), "{ok} should pass");
        }
        for bad in [json!("yes"), json!(2), json!(null), json!("")] {
            assert!(!Rule::IsBoolean.check(Some(&bad)), "{bad} should fail");
        }
    }

    #[test]
    fn test_chain_accumulates_in_order() {
        let chain = ValidationChain::new()
            .body("name", Rule::NotEmpty, "name empty")
            .body("price", Rule::IsNumeric, "not numeric")
            .body("price", Rule::NotEmpty, "price empty")
            .body("price", Rule::Positive, "not positive");

        let errors = chain.run(&body(json!({}))).unwrap_err();
        assert_eq!(errors.fields(), vec!["name", "price", "price", "price"]);
        let messages: Vec<&str> = errors.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["name empty", "not numeric", "price empty", "not positive"]
        );
    }

    #[test]
    fn test_chain_passes() {
        let chain = ValidationChain::new()
            .body("name", Rule::NotEmpty, "name empty")
            .body("price", Rule::Positive, "not positive");

        assert!(chain.run(&body(json!({"name": "Mouse", "price": 20}))).is_ok());
        assert!(chain.reads_body());
    }

    #[test]
    fn test_param_check_reports_value() {
        let chain = ValidationChain::new().param("id", Rule::IsInt, "Invalid ID");
        assert!(!chain.reads_body());

        let errors = chain.run(&id("abc")).unwrap_err();
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            json!({"errors": [{
                "type": "field",
                "location": "params",
                "field": "id",
                "message": "Invalid ID",
                "value": "abc"
            }]})
        );
    }

    #[test]
    fn test_missing_value_omitted_from_error() {
        let chain = ValidationChain::new().body("name", Rule::NotEmpty, "name empty");
        let errors = chain.run(&body(json!({}))).unwrap_err();
        let json = serde_json::to_value(&errors).unwrap();
        assert!(json["errors"][0].get("value").is_none());
    }

    #[test]
    fn test_parse_body() {
        assert!(RequestInput::parse_body(b"").unwrap().is_empty());
        assert!(RequestInput::parse_body(b"  \n").unwrap().is_empty());
        assert_eq!(
            RequestInput::parse_body(br#"{"name":"Mouse"}"#).unwrap()["name"],
            json!("Mouse")
        );
        assert!(RequestInput::parse_body(b"[1,2]").is_err());
        assert!(RequestInput::parse_body(b"{broken").is_err());
    }

    #[test]
    fn test_typed_accessors() {
        let input = body(json!({"name": 12, "price": "19.5", "availability": "false"}));
        assert_eq!(input.body_text("name").as_deref(), Some("12"));
        assert_eq!(input.body_number("price"), Some(19.5));
        assert_eq!(input.body_bool("availability"), Some(false));
        assert_eq!(id("-3").param_int("id"), Some(-3));
        assert_eq!(id("+3").param_int("id"), Some(3));
    }
}
