//! Matrix session resolution
//!
//! Works out which matrix the user means from a navigation path, a share
//! link or a bare id, and mints share links for a matrix.

use eisen_protocol::MatrixId;
use url::Url;

/// First path segment of a matrix deep link
const MATRIX_SEGMENT: &str = "matrix";

/// Extract the matrix id from a browser path of the form `/matrix/{id}`
///
/// The path must split on `/` into exactly `["", "matrix", id]`. Trailing
/// slashes, extra segments or a missing id do not match.
pub fn matrix_id_from_path(path: &str) -> Option<MatrixId> {
    let parts: Vec<&str> = path.split('/').collect();
    match parts.as_slice() {
        ["", MATRIX_SEGMENT, id] => MatrixId::new(*id),
        _ => None,
    }
}

/// Resolve user input to a matrix id
///
/// Accepts a full share link (`https://host/matrix/{id}`), a path
/// (`/matrix/{id}`) or a bare id.
pub fn resolve(input: &str) -> Option<MatrixId> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(url) = Url::parse(input) {
        if matches!(url.scheme(), "http" | "https") {
            return matrix_id_from_path(url.path());
        }
    }

    if input.starts_with('/') {
        return matrix_id_from_path(input);
    }

    if input.contains('/') || input.chars().any(char::is_whitespace) {
        return None;
    }

    MatrixId::new(input)
}

/// Build the shareable link for a matrix: `{origin}/matrix/{id}`
pub fn share_link(web_origin: &str, id: &MatrixId) -> String {
    format!(
        "{}/{}/{}",
        web_origin.trim_end_matches('/'),
        MATRIX_SEGMENT,
        id
    )
}
