use serde::Serialize;

/// Body of every endpoint that answers with a single confirmation line.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// A required string field: present and non-empty.
pub(crate) fn required(field: Option<&String>) -> Option<&str> {
    field.map(String::as_str).filter(|v| !v.is_empty())
}
