//! Translation of non-success responses into errors

use eisen_protocol::Route;
use eisen_utils::EisenError;
use reqwest::StatusCode;

/// Pull the `detail` string out of an error body, if there is one
///
/// Validation errors carry a list in `detail`; those fall through to the
/// status reason.
fn detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|d| d.as_str())
        .map(str::to_string)
}

/// Map a non-success response to an error
///
/// 404 on the matrix itself is the only not-found the board distinguishes;
/// 409 is always a conflict.
pub(crate) fn error_for_status(route: &Route, status: StatusCode, body: &str) -> EisenError {
    let reason = detail(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
    });

    match (route, status) {
        (Route::GetMatrix(id), StatusCode::NOT_FOUND) => EisenError::MatrixNotFound {
            id: id.to_string(),
        },
        (_, StatusCode::CONFLICT) => EisenError::Conflict(reason),
        _ => EisenError::Status {
            status: status.as_u16(),
            reason,
        },
    }
}
