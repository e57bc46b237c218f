//! Request validation from per-entity field-constraint tables.

use crate::error::AppError;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// Expected JSON shape of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    /// Object carrying an integer `id` (`{"id": 3}`).
    Reference,
}

#[derive(Clone, Copy, Debug)]
pub struct ValidationRule {
    pub field: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Rejects strings that are empty or whitespace only.
    pub not_blank: bool,
    pub max_length: Option<usize>,
    pub min_length: Option<usize>,
    pub email: bool,
}

impl ValidationRule {
    const fn new(field: &'static str, kind: FieldKind) -> Self {
        ValidationRule {
            field,
            kind,
            required: false,
            not_blank: false,
            max_length: None,
            min_length: None,
            email: false,
        }
    }

    const fn text(field: &'static str) -> Self {
        Self::new(field, FieldKind::Text)
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self.not_blank = true;
        self
    }

    const fn max(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    const fn min(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    const fn email(mut self) -> Self {
        self.email = true;
        self
    }
}

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Compiled once per process.
fn email_regex() -> Result<&'static Regex, AppError> {
    static EMAIL: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN))
        .as_ref()
        .map_err(|e| AppError::Validation(format!("invalid email pattern: {}", e)))
}

const ID: ValidationRule = ValidationRule::new("id", FieldKind::Integer);

pub const POST_RULES: &[ValidationRule] = &[
    ID,
    ValidationRule::text("titulo").required().max(100),
    ValidationRule::text("texto").required().max(1000),
    ValidationRule::new("tema", FieldKind::Reference).required(),
    ValidationRule::new("usuario", FieldKind::Reference),
];

pub const THEME_RULES: &[ValidationRule] = &[ID, ValidationRule::text("descricao").required().max(255)];

pub const USER_RULES: &[ValidationRule] = &[
    ID,
    ValidationRule::text("nome").required().max(255),
    ValidationRule::text("usuario").required().max(255).email(),
    ValidationRule::text("senha").required().min(8),
    ValidationRule::text("foto").max(5000),
];

pub const LOGIN_RULES: &[ValidationRule] = &[
    ValidationRule::text("usuario").required(),
    ValidationRule::text("senha").required(),
];

pub struct RequestValidator;

impl RequestValidator {
    /// Validate body against the rule table. All required fields must be present and non-null.
    pub fn validate(body: &Value, rules: &[ValidationRule]) -> Result<(), AppError> {
        let obj = as_object(body)?;
        for rule in rules {
            let val = obj.get(rule.field);
            if rule.required && (val.is_none() || val == Some(&Value::Null)) {
                return Err(AppError::Validation(format!("{} is required", rule.field)));
            }
            if let Some(v) = val {
                validate_field(v, rule)?;
            }
        }
        Ok(())
    }

    /// Validate then deserialize into the typed input.
    pub fn parse<T: DeserializeOwned>(body: Value, rules: &[ValidationRule]) -> Result<T, AppError> {
        Self::validate(&body, rules)?;
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, AppError> {
    body.as_object()
        .ok_or_else(|| AppError::Validation("body must be a JSON object".into()))
}

fn validate_field(v: &Value, rule: &ValidationRule) -> Result<(), AppError> {
    if v.is_null() {
        return Ok(());
    }
    let col = rule.field;
    match rule.kind {
        FieldKind::Integer => {
            if v.as_i64().is_none() {
                return Err(AppError::Validation(format!("{} must be an integer", col)));
            }
        }
        FieldKind::Reference => {
            let has_id = v.get("id").and_then(Value::as_i64).is_some();
            if !has_id {
                return Err(AppError::Validation(format!("{}.id must be an integer", col)));
            }
        }
        FieldKind::Text => {
            let s = v
                .as_str()
                .ok_or_else(|| AppError::Validation(format!("{} must be a string", col)))?;
            validate_text(col, s, rule)?;
        }
    }
    Ok(())
}

fn validate_text(col: &str, s: &str, rule: &ValidationRule) -> Result<(), AppError> {
    if rule.not_blank && s.trim().is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", col)));
    }
    let len = s.chars().count();
    if let Some(max) = rule.max_length {
        if len > max {
            return Err(AppError::Validation(format!(
                "{} must be at most {} characters",
                col, max
            )));
        }
    }
    if let Some(min) = rule.min_length {
        if len < min {
            return Err(AppError::Validation(format!(
                "{} must be at least {} characters",
                col, min
            )));
        }
    }
    if rule.email {
        if !email_regex()?.is_match(s) {
            return Err(AppError::Validation(format!("{} must be a valid email", col)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn err_msg(r: Result<(), AppError>) -> String {
        match r {
            Err(AppError::Validation(m)) => m,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn accepts_valid_post() {
        let body = json!({ "titulo": "Olá", "texto": "mundo", "tema": { "id": 1 } });
        RequestValidator::validate(&body, POST_RULES).unwrap();
    }

    #[test]
    fn rejects_missing_and_blank_required_fields() {
        let missing = json!({ "texto": "x", "tema": { "id": 1 } });
        assert_eq!(err_msg(RequestValidator::validate(&missing, POST_RULES)), "titulo is required");

        let blank = json!({ "titulo": "   ", "texto": "x", "tema": { "id": 1 } });
        assert_eq!(err_msg(RequestValidator::validate(&blank, POST_RULES)), "titulo must not be empty");

        let null_tema = json!({ "titulo": "a", "texto": "x", "tema": null });
        assert_eq!(err_msg(RequestValidator::validate(&null_tema, POST_RULES)), "tema is required");
    }

    #[test]
    fn enforces_lengths_in_characters() {
        let ok = json!({ "titulo": "é".repeat(100), "texto": "x", "tema": { "id": 1 } });
        RequestValidator::validate(&ok, POST_RULES).unwrap();

        let long = json!({ "titulo": "a".repeat(101), "texto": "x", "tema": { "id": 1 } });
        assert_eq!(
            err_msg(RequestValidator::validate(&long, POST_RULES)),
            "titulo must be at most 100 characters"
        );

        let short_pw = json!({ "nome": "Ana", "usuario": "ana@mail.com", "senha": "1234567" });
        assert_eq!(
            err_msg(RequestValidator::validate(&short_pw, USER_RULES)),
            "senha must be at least 8 characters"
        );
    }

    #[test]
    fn checks_reference_and_types() {
        let bad_ref = json!({ "titulo": "a", "texto": "b", "tema": { "descricao": "x" } });
        assert_eq!(err_msg(RequestValidator::validate(&bad_ref, POST_RULES)), "tema.id must be an integer");

        let bad_id = json!({ "id": "7", "descricao": "x" });
        assert_eq!(err_msg(RequestValidator::validate(&bad_id, THEME_RULES)), "id must be an integer");

        let not_string = json!({ "descricao": 5 });
        assert_eq!(err_msg(RequestValidator::validate(&not_string, THEME_RULES)), "descricao must be a string");

        assert_eq!(
            err_msg(RequestValidator::validate(&json!([1, 2]), THEME_RULES)),
            "body must be a JSON object"
        );
    }

    #[test]
    fn checks_email_format() {
        let bad = json!({ "nome": "Ana", "usuario": "ana.mail.com", "senha": "12345678" });
        assert_eq!(
            err_msg(RequestValidator::validate(&bad, USER_RULES)),
            "usuario must be a valid email"
        );
        let good = json!({ "nome": "Ana", "usuario": "ana@mail.com", "senha": "12345678" });
        RequestValidator::validate(&good, USER_RULES).unwrap();
    }

    #[test]
    fn email_pattern_is_compiled_once() {
        let a = email_regex().unwrap();
        let b = email_regex().unwrap();
        assert!(std::ptr::eq(a, b));
        assert!(a.is_match("root@root.com"));
        assert!(!a.is_match("root @root.com"));
    }

    #[test]
    fn parse_produces_typed_input() {
        let body = json!({ "id": 2, "titulo": "a", "texto": "b", "tema": { "id": 9 }, "usuario": { "id": 4 } });
        let input: crate::model::PostInput = RequestValidator::parse(body, POST_RULES).unwrap();
        assert_eq!(input.id, Some(2));
        assert_eq!(input.tema.id, 9);
        assert_eq!(input.usuario.map(|u| u.id), Some(4));
    }
}
