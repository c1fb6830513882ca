//! Request extractors.
//!
//! `AppJson` replaces the stock `Json` extractor for request bodies so
//! that malformed or incomplete JSON is rejected with a 400 and the
//! standard `{"error": ...}` body instead of axum's default 422.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;

use crate::error::AppError;

/// JSON request body that rejects with [`AppError::BadRequest`].
#[derive(Debug)]
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct SignupBody {
        name: String,
        email: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn missing_key_rejects_with_400() {
        let req = json_request(r#"{"name": "Ada"}"#);
        let err = AppJson::<SignupBody>::from_request(req, &())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_object_rejects_with_400() {
        let req = json_request("{}");
        let err = AppJson::<SignupBody>::from_request(req, &())
            .await
            .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn well_formed_body_parses() {
        let req = json_request(r#"{"name": "Ada", "email": "ada@example.com"}"#);
        let AppJson(body) = AppJson::<SignupBody>::from_request(req, &())
            .await
            .unwrap();

        assert_eq!(body.name, "Ada");
        assert_eq!(body.email, "ada@example.com");
    }
}
