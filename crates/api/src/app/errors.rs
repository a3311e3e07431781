use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use quickorder_cart::SubmissionError;

use crate::app::dto;

pub fn submission_error_to_response(err: SubmissionError) -> axum::response::Response {
    let status = match &err {
        SubmissionError::InvalidToken => StatusCode::FORBIDDEN,
        SubmissionError::MissingProduct
        | SubmissionError::InvalidProduct(_)
        | SubmissionError::NoItems => StatusCode::BAD_REQUEST,
        SubmissionError::NothingAdded { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    };

    let mut body = json!({
        "ok": false,
        "error": err.code(),
        "message": err.to_string(),
    });
    // Lets the client mark the offending rows.
    if let SubmissionError::NothingAdded { failures } = &err {
        body["failures"] = json!(dto::failures_to_json(failures));
    }
    (status, axum::Json(body)).into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "ok": false,
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
