use async_trait::async_trait;
use mastery_core::{CoreError, ImageSource};
use std::path::PathBuf;

/// Reads image bytes from a path given on the command line.
pub struct FileImage(pub Option<PathBuf>);

#[async_trait]
impl ImageSource for FileImage {
    async fn request_image(&self) -> Result<Option<Vec<u8>>, CoreError> {
        let Some(path) = &self.0 else {
            return Ok(None);
        };
        match tokio::fs::read(path).await {
            Ok(bytes) if bytes.is_empty() => Ok(None),
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "image read failed");
                Err(CoreError::Invalid("unreadable image file"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_bytes_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("pic.png");
        std::fs::write(&p, [1u8, 2, 3]).unwrap();
        assert_eq!(FileImage(Some(p)).request_image().await, Ok(Some(vec![1, 2, 3])));
    }

    #[tokio::test]
    async fn no_path_and_missing_file() {
        assert_eq!(FileImage(None).request_image().await, Ok(None));
        let missing = FileImage(Some(PathBuf::from("/definitely/not/here.png")));
        assert!(missing.request_image().await.is_err());
    }
}
