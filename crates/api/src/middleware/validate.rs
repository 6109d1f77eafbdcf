use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{StatusCode, request::Parts},
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use validator::{Validate, ValidationError, ValidationErrors};

type Rejection = (StatusCode, Json<Value>);

/// JSON body that has passed its `validator` rules.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let payload = json!({
                    "error": "Invalid JSON",
                    "message": rejection.body_text(),
                });
                (rejection.status(), Json(payload))
            })?;

        value.validate().map_err(|errors| validation_rejection(&errors))?;

        Ok(Self(value))
    }
}

/// Query string that has passed its `validator` rules.
pub struct SimpleValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for SimpleValidatedQuery<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                let payload = json!({
                    "error": "Invalid query",
                    "message": rejection.body_text(),
                });
                (rejection.status(), Json(payload))
            })?;

        value.validate().map_err(|errors| validation_rejection(&errors))?;

        Ok(Self(value))
    }
}

fn validation_rejection(errors: &ValidationErrors) -> Rejection {
    let payload = json!({
        "error": "Validation failed",
        "message": format_validation_errors(errors),
        "details": format_validation_errors_detailed(errors),
    });
    (StatusCode::BAD_REQUEST, Json(payload))
}

fn describe(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    match error.code.as_ref() {
        "email" => "Invalid email format".to_string(),
        "url" => "Invalid URL format".to_string(),
        "length" => "Invalid length".to_string(),
        "range" => "Value out of range".to_string(),
        "regex" => "Invalid format".to_string(),
        _ => format!("Invalid {field}"),
    }
}

fn format_validation_errors(errors: &ValidationErrors) -> String {
    let messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors
                .iter()
                .map(move |e| format!("{field}: {}", describe(&field, e)))
        })
        .collect();

    if messages.is_empty() {
        "Validation failed".to_string()
    } else {
        messages.join("; ")
    }
}

fn format_validation_errors_detailed(errors: &ValidationErrors) -> Value {
    let mut error_map = serde_json::Map::new();

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors.iter().map(|e| describe(&field, e)).collect();
        error_map.insert(field.to_string(), json!(messages));
    }

    Value::Object(error_map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 3, message = "too short"))]
        name: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn detailed_errors_are_keyed_by_field() {
        let probe = Probe {
            name: "ab".into(),
            email: "nope".into(),
        };
        let errors = probe.validate().unwrap_err();

        let details = format_validation_errors_detailed(&errors);
        assert_eq!(details["name"], json!(["too short"]));
        assert_eq!(details["email"], json!(["Invalid email format"]));

        let summary = format_validation_errors(&errors);
        assert!(summary.contains("name: too short"));
    }
}
