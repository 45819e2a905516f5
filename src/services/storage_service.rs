use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::utils::signing;

pub const BUCKET: &str = "documents";

const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png", "webp", "doc", "docx"];

#[derive(Debug, Clone, Serialize)]
pub struct SignedUrl {
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

/// Local-disk "documents" bucket. Objects live at `{profile_id}/{timestamp}.{ext}`.
#[derive(Clone)]
pub struct StorageService {
    root: PathBuf,
    signing_key: String,
    ttl_seconds: i64,
    public_base_url: String,
}

impl StorageService {
    pub fn new(
        root: impl Into<PathBuf>,
        signing_key: String,
        ttl_seconds: i64,
        public_base_url: String,
    ) -> Self {
        Self {
            root: root.into(),
            signing_key,
            ttl_seconds,
            public_base_url,
        }
    }

    /// Returns the lower-cased extension if the file name and content are acceptable.
    pub fn validate_upload(filename: &str, data: &[u8]) -> Result<String> {
        if data.is_empty() {
            return Err(Error::BadRequest("Uploaded file is empty".into()));
        }

        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| Error::BadRequest("File must have an extension".into()))?;

        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(Error::BadRequest(format!("File type .{} is not allowed", ext)));
        }

        if ext == "pdf" && !data.starts_with(b"%PDF") {
            return Err(Error::BadRequest("Invalid PDF file content".into()));
        }
        if (ext == "jpg" || ext == "jpeg") && !data.starts_with(&[0xFF, 0xD8]) {
            return Err(Error::BadRequest("Invalid JPEG file content".into()));
        }
        if ext == "png" && !data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Err(Error::BadRequest("Invalid PNG file content".into()));
        }

        Ok(ext)
    }

    pub fn object_path(profile_id: Uuid, timestamp_millis: i64, ext: &str) -> String {
        format!("{}/{}.{}", profile_id, timestamp_millis, ext)
    }

    /// Writes a new object for `profile_id` and returns its path inside the bucket.
    pub async fn store(&self, profile_id: Uuid, ext: &str, data: &[u8]) -> Result<String> {
        let dir = self.root.join(profile_id.to_string());
        fs::create_dir_all(&dir).await?;

        let mut timestamp = Utc::now().timestamp_millis();
        for _ in 0..5 {
            let object_path = Self::object_path(profile_id, timestamp, ext);
            let target = self.root.join(&object_path);
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&target)
                .await
            {
                Ok(mut file) => {
                    file.write_all(data).await?;
                    file.flush().await?;
                    tracing::debug!(bucket = BUCKET, path = %object_path, bytes = data.len(), "stored object");
                    return Ok(object_path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => timestamp += 1,
                Err(e) => return Err(e.into()),
            }
        }

        Err(Error::Conflict("Could not allocate a storage path".into()))
    }

    /// Best-effort delete; failures are logged, never returned.
    pub async fn remove(&self, object_path: &str) {
        let target = match self.resolve(object_path) {
            Ok(target) => target,
            Err(_) => {
                tracing::warn!(path = %object_path, "refusing to remove malformed object path");
                return;
            }
        };
        if let Err(e) = fs::remove_file(&target).await {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!(path = %object_path, error = %e, "failed to remove stored object");
            }
        }
    }

    pub async fn read(&self, object_path: &str) -> Result<Vec<u8>> {
        let target = self.resolve(object_path)?;
        match fs::read(&target).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(Error::NotFound("Stored file not found".into()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn signed_url(&self, object_path: &str, now: DateTime<Utc>) -> Result<SignedUrl> {
        let expires = now.timestamp() + self.ttl_seconds;
        let signature = signing::sign_path(&self.signing_key, object_path, expires)
            .ok_or_else(|| Error::Internal("Failed to sign storage URL".into()))?;
        let expires_at = DateTime::<Utc>::from_timestamp(expires, 0)
            .ok_or_else(|| Error::Internal("Signed URL expiry out of range".into()))?;

        Ok(SignedUrl {
            url: format!(
                "{}/api/storage/{}/{}?expires={}&signature={}",
                self.public_base_url, BUCKET, object_path, expires, signature
            ),
            expires_at,
        })
    }

    pub fn verify(&self, object_path: &str, expires: i64, signature: &str, now: i64) -> bool {
        signing::verify_path(&self.signing_key, object_path, expires, signature, now)
    }

    /// Maps an object path onto disk, accepting only `{uuid}/{digits}.{ext}`.
    fn resolve(&self, object_path: &str) -> Result<PathBuf> {
        let malformed = || Error::BadRequest("Malformed storage path".into());

        let (owner, file) = object_path.split_once('/').ok_or_else(malformed)?;
        Uuid::parse_str(owner).map_err(|_| malformed())?;
        let (stem, ext) = file.split_once('.').ok_or_else(malformed)?;
        if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        if !ALLOWED_EXTENSIONS.contains(&ext) {
            return Err(malformed());
        }

        Ok(self.root.join(owner).join(file))
    }

    pub fn content_type(object_path: &str) -> &'static str {
        match object_path.rsplit('.').next().unwrap_or_default() {
            "pdf" => "application/pdf",
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "webp" => "image/webp",
            "doc" => "application/msword",
            "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            _ => "application/octet-stream",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_storage() -> StorageService {
        let root = std::env::temp_dir().join(format!("documents-test-{}", Uuid::new_v4()));
        StorageService::new(root, "key".into(), 60, "http://files.local".into())
    }

    #[test]
    fn object_path_follows_bucket_convention() {
        let id = Uuid::parse_str("7f2c9f0e-4a59-4f55-9bb6-1f1c8a4f2d11").unwrap();
        assert_eq!(
            StorageService::object_path(id, 1767225600000, "pdf"),
            "7f2c9f0e-4a59-4f55-9bb6-1f1c8a4f2d11/1767225600000.pdf"
        );
    }

    #[test]
    fn validate_upload_checks_extension_and_magic_bytes() {
        assert_eq!(
            StorageService::validate_upload("cv.PDF", b"%PDF-1.7").unwrap(),
            "pdf"
        );
        assert!(StorageService::validate_upload("cv.pdf", b"hello").is_err());
        assert!(StorageService::validate_upload("run.exe", b"MZ").is_err());
        assert!(StorageService::validate_upload("noext", b"%PDF").is_err());
        assert!(StorageService::validate_upload("empty.pdf", b"").is_err());
        assert!(StorageService::validate_upload("id.png", &[0x89, 0x50, 0x4E, 0x47]).is_ok());
    }

    #[test]
    fn resolve_refuses_traversal() {
        let storage = temp_storage();
        assert!(storage.resolve("../etc/passwd").is_err());
        assert!(storage
            .resolve("7f2c9f0e-4a59-4f55-9bb6-1f1c8a4f2d11/../../x.pdf")
            .is_err());
        assert!(storage
            .resolve("7f2c9f0e-4a59-4f55-9bb6-1f1c8a4f2d11/123.pdf")
            .is_ok());
    }

    #[tokio::test]
    async fn store_read_and_remove_round_trip() {
        let storage = temp_storage();
        let owner = Uuid::new_v4();

        let first = storage.store(owner, "pdf", b"%PDF-1").await.unwrap();
        let second = storage.store(owner, "pdf", b"%PDF-2").await.unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with(&owner.to_string()));

        assert_eq!(storage.read(&first).await.unwrap(), b"%PDF-1");
        storage.remove(&first).await;
        assert!(matches!(storage.read(&first).await, Err(Error::NotFound(_))));
        assert_eq!(storage.read(&second).await.unwrap(), b"%PDF-2");
    }

    #[test]
    fn signed_url_verifies_with_same_storage() {
        let storage = temp_storage();
        let now = Utc::now();
        let path = "7f2c9f0e-4a59-4f55-9bb6-1f1c8a4f2d11/123.pdf";
        let signed = storage.signed_url(path, now).unwrap();

        assert!(signed
            .url
            .starts_with("http://files.local/api/storage/documents/7f2c9f0e"));
        let signature = signed.url.rsplit("signature=").next().unwrap();
        let expires = signed.expires_at.timestamp();
        assert!(storage.verify(path, expires, signature, now.timestamp()));
        assert!(!storage.verify(path, expires, signature, expires + 1));
    }
}
