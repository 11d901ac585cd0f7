//! Reading files picked by the user into `data:` URIs, the form in which
//! photos and documents are stored.

use crate::error::{AppError, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fs;
use std::path::Path;

pub fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("dwg") => "image/vnd.dwg",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Splits a base64 `data:` URI into its mime type and payload.
pub fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>)> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| AppError::invalid("not a data URI"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| AppError::invalid("data URI has no payload"))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| AppError::invalid("only base64 data URIs are supported"))?;
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| AppError::invalid(format!("bad base64 payload: {}", e)))?;
    Ok((mime.to_string(), bytes))
}

/// No size limit is enforced; large files are only logged.
pub fn read_as_data_uri(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let mime = mime_for_path(path);
    log::info!(
        "Importing {} ({}, {} KiB)",
        path.display(),
        mime,
        bytes.len() / 1024
    );
    Ok(encode_data_uri(mime, &bytes))
}
