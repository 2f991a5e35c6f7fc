use axum::{http::StatusCode, response::IntoResponse};

#[derive(Debug, thiserror::Error)]
pub enum LiquidCalcError {
    #[error("404 Not Found")]
    NotFound,

    #[error("500 Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for LiquidCalcError {
    fn into_response(self) -> axum::response::Response {
        use LiquidCalcError::*;

        let code = match self {
            NotFound => StatusCode::NOT_FOUND,
            Internal(ref inner) => {
                tracing::error!("Internal server error: {inner:#}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (code, "").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn not_found_has_an_empty_body() {
        let response = LiquidCalcError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn internal_errors_map_to_500() {
        let response =
            LiquidCalcError::from(anyhow::anyhow!("template exploded")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
