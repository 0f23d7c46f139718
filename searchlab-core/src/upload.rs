//! Helpers for the two-step product upload: presigned storage POST followed
//! by indexing the product document.

use crate::error::UploadError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("Invalid filename regex"));

/// Strip every non-alphanumeric character, extension dot included.
pub fn sanitize_filename(name: &str) -> Result<String, UploadError> {
    let cleaned = NON_ALPHANUMERIC.replace_all(name, "").into_owned();
    if cleaned.is_empty() {
        return Err(UploadError::EmptyFileName(name.to_string()));
    }
    Ok(cleaned)
}

/// Content type from the file extension; unknown types are sent as raw bytes.
pub fn guess_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Body of `POST /presigned-url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignedUrlRequest {
    pub filename: String,
    #[serde(rename = "contentType")]
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignedEnvelope {
    pub result: PresignedUpload,
}

/// Storage POST target and the form fields it must carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignedUpload {
    pub url: String,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl PresignedUpload {
    /// Stored file name: the second `/`-separated segment of the object key.
    pub fn stored_file_name(&self) -> Result<String, UploadError> {
        let key = self.fields.get("key").ok_or(UploadError::MissingKey)?;
        key.split('/')
            .nth(1)
            .map(str::to_string)
            .ok_or_else(|| UploadError::MalformedKey(key.clone()))
    }
}

/// Product form as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub color: String,
    pub file_path: String,
}

impl ProductForm {
    pub fn file(&self) -> Result<&Path, UploadError> {
        let trimmed = self.file_path.trim();
        if trimmed.is_empty() {
            return Err(UploadError::MissingFile);
        }
        Ok(Path::new(trimmed))
    }

    pub fn presigned_request(&self) -> Result<PresignedUrlRequest, UploadError> {
        let path = self.file()?;
        let raw_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or(UploadError::MissingFile)?;
        Ok(PresignedUrlRequest {
            filename: sanitize_filename(raw_name)?,
            content_type: guess_content_type(path).to_string(),
        })
    }

    pub fn to_document(&self, upload: &PresignedUpload) -> Result<CustomDocument, UploadError> {
        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| UploadError::InvalidPrice(self.price.clone()))?;
        Ok(CustomDocument {
            title: self.name.clone(),
            description: self.description.clone(),
            price,
            category: self.category.clone(),
            color: self.color.clone(),
            file_name: upload.stored_file_name()?,
        })
    }
}

/// One entry of the `POST /index-custom-document` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomDocument {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub color: String,
    pub file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn upload(key: &str) -> PresignedUpload {
        PresignedUpload {
            url: "https://bucket.s3.amazonaws.com/".to_string(),
            fields: BTreeMap::from([
                ("key".to_string(), key.to_string()),
                ("policy".to_string(), "abc".to_string()),
            ]),
        }
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("red shoes (1).png").unwrap(), "redshoes1png");
        assert_eq!(
            sanitize_filename("__.-").unwrap_err(),
            UploadError::EmptyFileName("__.-".to_string())
        );
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type(Path::new("a/b/photo.JPG")), "image/jpeg");
        assert_eq!(guess_content_type(Path::new("notes")), "application/octet-stream");
    }

    #[test]
    fn test_stored_file_name() {
        assert_eq!(upload("uploads/redshoespng").stored_file_name().unwrap(), "redshoespng");
        assert_eq!(
            upload("redshoespng").stored_file_name().unwrap_err(),
            UploadError::MalformedKey("redshoespng".to_string())
        );
        let no_key = PresignedUpload {
            url: String::new(),
            fields: BTreeMap::new(),
        };
        assert_eq!(no_key.stored_file_name().unwrap_err(), UploadError::MissingKey);
    }

    #[test]
    fn test_presigned_request_wire_shape() {
        let form = ProductForm {
            file_path: "/tmp/red-shoes.png".to_string(),
            ..ProductForm::default()
        };
        assert_eq!(
            serde_json::to_value(form.presigned_request().unwrap()).unwrap(),
            json!({"filename": "redshoespng", "contentType": "image/png"})
        );
    }

    #[test]
    fn test_document_from_form() {
        let form = ProductForm {
            name: "Red Shoes".to_string(),
            description: "Comfy".to_string(),
            price: "49.99".to_string(),
            category: "women".to_string(),
            color: "red".to_string(),
            file_path: "/tmp/red.png".to_string(),
        };
        let doc = form.to_document(&upload("uploads/redpng")).unwrap();
        assert_eq!(
            serde_json::to_value(vec![doc]).unwrap(),
            json!([{
                "title": "Red Shoes",
                "description": "Comfy",
                "price": 49.99,
                "category": "women",
                "color": "red",
                "file_name": "redpng"
            }])
        );
    }

    #[test]
    fn test_invalid_price_rejected() {
        let form = ProductForm {
            price: "cheap".to_string(),
            ..ProductForm::default()
        };
        assert_eq!(
            form.to_document(&upload("uploads/x")).unwrap_err(),
            UploadError::InvalidPrice("cheap".to_string())
        );
    }

    #[test]
    fn test_missing_file() {
        assert_eq!(
            ProductForm::default().presigned_request().unwrap_err(),
            UploadError::MissingFile
        );
    }
}
