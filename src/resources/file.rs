//! File resource: base64 upload, retrieval, deletion and listing.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};

use crate::clients::{ServicesClient, ServicesError};
use crate::error::InputError;
use crate::query::page_param;
use crate::resources::require_id;

impl ServicesClient {
    /// Uploads a local file (`POST file.json`).
    ///
    /// The file is read into memory and sent base64 encoded. `filename`
    /// defaults to the file name of `path`. Unmanaged uploads are created
    /// with `status: 0` so Drupal treats them as temporary.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::UnreadableFile`] if the file cannot be read
    /// (no request is sent), or the classified HTTP error.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let created = client.upload_file("photos/cat.jpg", None, true).await?;
    /// println!("fid: {}", created["fid"]);
    /// ```
    pub async fn upload_file(
        &self,
        path: impl AsRef<Path>,
        filename: Option<&str>,
        managed: bool,
    ) -> Result<Value, ServicesError> {
        let path = path.as_ref();
        let contents = tokio::fs::read(path)
            .await
            .map_err(|e| InputError::UnreadableFile {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let filename = filename.map_or_else(
            || {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default()
            },
            str::to_string,
        );

        let mut payload = json!({
            "filesize": contents.len(),
            "filename": filename,
            "file": STANDARD.encode(&contents),
            "uid": self.session().uid().unwrap_or(0),
        });
        if !managed {
            payload["status"] = json!(0);
        }

        self.post("file.json", payload).await
    }

    /// Retrieves a file (`GET file/{fid}.json`).
    ///
    /// `include_contents` adds the base64 file data; `include_styles` adds
    /// image style derivative URLs.
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::InvalidInput`] for a fid of 0, or the
    /// classified HTTP error.
    pub async fn view_file(
        &self,
        fid: u64,
        include_contents: bool,
        include_styles: bool,
    ) -> Result<Value, ServicesError> {
        let fid = require_id("file", fid)?;
        let query = [
            ("file_contents", u8::from(include_contents).to_string()),
            ("image_styles", u8::from(include_styles).to_string()),
        ]
        .into_iter()
        .collect();

        self.get(&format!("file/{fid}.json"), Some(query)).await
    }

    /// Deletes a file (`DELETE file/{fid}.json`).
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::InvalidInput`] for a fid of 0, or the
    /// classified HTTP error.
    pub async fn delete_file(&self, fid: u64) -> Result<Value, ServicesError> {
        let fid = require_id("file", fid)?;
        self.delete(&format!("file/{fid}.json")).await
    }

    /// Lists files (`GET file.json?page=..&pagesize=..`).
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError`] if the request fails.
    pub async fn index_files(&self, page: u32, pagesize: u32) -> Result<Value, ServicesError> {
        self.get("file.json", Some(page_param(page, pagesize))).await
    }
}
