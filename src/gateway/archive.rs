use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;

pub const ARCHIVE_EXTENSION: &str = ".zip";
pub const PARTIAL_EXTENSION: &str = ".part";
pub const GENERATION_FAILED: &str = "Failed to generate simulation.";
pub const UNKNOWN_FAILURE: &str = "An unknown error occurred.";

/// A generated scenario archive written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    pub file_name: String,
    pub path: PathBuf,
    pub size: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

/// File name for the downloaded archive: the `filename` of the
/// content-disposition header if present, else the scenario name.
///
/// Only the last path component of the header value is used.
pub fn suggested_file_name(content_disposition: Option<&str>, scenario_name: &str) -> String {
    content_disposition
        .and_then(file_name_from_header)
        .unwrap_or_else(|| fallback_file_name(scenario_name))
}

fn file_name_from_header(header: &str) -> Option<String> {
    let (_, rest) = header.split_once("filename=")?;
    let value = rest.split(';').next()?.trim().trim_matches('"');
    let name = value.rsplit(['/', '\\']).next()?.trim();

    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    Some(name.to_string())
}

fn fallback_file_name(scenario_name: &str) -> String {
    let stem = scenario_name.trim();
    if stem.is_empty() {
        return format!("simulation{}", ARCHIVE_EXTENSION);
    }
    format!("{}{}", stem.replace(['/', '\\'], "_"), ARCHIVE_EXTENSION)
}

/// Human-readable message of a failed generation request. The body is
/// expected to be JSON with a `detail` entry; anything else degrades to a
/// generic message.
pub fn decode_error_detail(body: &[u8]) -> String {
    let Ok(text) = std::str::from_utf8(body) else {
        return UNKNOWN_FAILURE.to_string();
    };

    match serde_json::from_str::<ErrorBody>(text) {
        Ok(body) => match body.detail {
            Some(Value::String(detail)) if !detail.is_empty() => detail,
            Some(Value::String(_)) | Some(Value::Null) | None => GENERATION_FAILED.to_string(),
            Some(other) => other.to_string(),
        },
        Err(_) => UNKNOWN_FAILURE.to_string(),
    }
}
