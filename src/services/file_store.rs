use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::models::resume::StoredFile;
use crate::utils::token::upload_token;

pub const MB: usize = 1024 * 1024;

pub const PDF: &str = "application/pdf";
pub const DOC: &str = "application/msword";
pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Subdirectory of the uploads root holding every resume.
pub const RESUME_DIRECTORY: &str = "resumes";

/// Allow-list and size ceiling a caller imposes on an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub allowed_types: &'static [&'static str],
    pub max_bytes: usize,
    pub type_error: &'static str,
}

impl UploadPolicy {
    pub const APPLICATION_RESUME: UploadPolicy = UploadPolicy {
        allowed_types: &[PDF, DOC, DOCX],
        max_bytes: 10 * MB,
        type_error: "Invalid file type. Only PDF and Word documents are allowed.",
    };

    pub const DROP_RESUME: UploadPolicy = UploadPolicy {
        allowed_types: &[PDF],
        max_bytes: 5 * MB,
        type_error: "Only PDF files are allowed",
    };

    pub fn check(&self, media_type: &str, size: usize) -> Result<()> {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if !self.allowed_types.contains(&essence.as_str()) {
            return Err(Error::InvalidMediaType(self.type_error.to_string()));
        }
        if size > self.max_bytes {
            return Err(Error::FileTooLarge {
                limit_bytes: self.max_bytes,
            });
        }
        Ok(())
    }
}

/// Replaces every character outside `[A-Za-z0-9.]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "resume".to_string()
    } else {
        cleaned
    }
}

/// Recovers the sanitized original name from a stored `<token>-<name>`.
pub fn original_name_from_stored(stored: &str) -> &str {
    match stored.split_once('-') {
        Some((_, rest)) if !rest.is_empty() => rest,
        _ => stored,
    }
}

fn check_path_component(component: &str) -> Result<()> {
    if component.is_empty()
        || component == "."
        || component == ".."
        || component.contains('/')
        || component.contains('\\')
    {
        return Err(Error::validation(
            format!("Invalid file name: {}", component),
            vec!["filename".to_string()],
        ));
    }
    Ok(())
}

fn map_missing(err: std::io::Error, name: &str) -> Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        Error::NotFound(format!("File {} not found", name))
    } else {
        Error::StorageIo(err)
    }
}

/// Writes uploads under a fixed root and hands back the public path
/// (`/uploads/<directory>/<name>`) used to fetch them later.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn store(
        &self,
        data: &[u8],
        media_type: &str,
        original_name: &str,
        directory: &str,
        policy: &UploadPolicy,
    ) -> Result<StoredFile> {
        policy.check(media_type, data.len())?;
        check_path_component(directory)?;

        let file_name = format!("{}-{}", upload_token(), sanitize_file_name(original_name));
        let dir = self.root.join(directory);
        fs::create_dir_all(&dir).await.map_err(|e| {
            tracing::error!(dir = %dir.display(), error = %e, "Failed to create upload directory");
            Error::StorageIo(e)
        })?;

        let path = dir.join(&file_name);
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                tracing::error!(path = %path.display(), error = %e, "Failed to create upload file");
                Error::StorageIo(e)
            })?;
        file.write_all(data).await?;
        file.flush().await?;

        tracing::info!(file = %file_name, size = data.len(), "Stored upload");

        Ok(StoredFile {
            relative_path: format!("/uploads/{}/{}", directory, file_name),
            file_name,
            size: data.len() as u64,
            media_type: media_type.to_string(),
        })
    }

    pub async fn read(&self, directory: &str, name: &str) -> Result<Vec<u8>> {
        check_path_component(directory)?;
        check_path_component(name)?;
        fs::read(self.root.join(directory).join(name))
            .await
            .map_err(|e| map_missing(e, name))
    }

    pub async fn remove(&self, directory: &str, name: &str) -> Result<()> {
        check_path_component(directory)?;
        check_path_component(name)?;
        fs::remove_file(self.root.join(directory).join(name))
            .await
            .map_err(|e| map_missing(e, name))
    }
}
