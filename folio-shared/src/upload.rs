use crate::ValidationError;

/// Largest accepted thumbnail, 5 MiB
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Bucket that holds project thumbnails
pub const THUMBNAIL_BUCKET: &str = "project-images";

/// A project thumbnail that passed client-side checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Accept only `image/*` content of at most [`MAX_IMAGE_BYTES`].
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, ValidationError> {
        let file_name = file_name.into();
        let content_type = content_type.into();

        validate_image(&content_type, bytes.len() as u64)?;
        if file_name.is_empty()
            || file_name.contains('/')
            || file_name.contains('\\')
            || file_name == "."
            || file_name == ".."
        {
            return Err(ValidationError::InvalidFileName(file_name));
        }

        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    /// Object path inside [`THUMBNAIL_BUCKET`]
    pub fn object_path(&self) -> String {
        format!("projects/{}", self.file_name)
    }
}

/// Check a MIME type and size before any bytes leave the machine
pub fn validate_image(content_type: &str, size: u64) -> Result<(), ValidationError> {
    if !content_type.trim().to_ascii_lowercase().starts_with("image/") {
        return Err(ValidationError::NotAnImage(content_type.to_string()));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(ValidationError::TooLarge {
            size,
            limit: MAX_IMAGE_BYTES,
        });
    }
    Ok(())
}

/// Guess an image MIME type from a file extension
pub fn image_mime_for(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_limit_is_inclusive() {
        assert_eq!(validate_image("image/png", MAX_IMAGE_BYTES), Ok(()));
        assert_eq!(
            validate_image("image/png", MAX_IMAGE_BYTES + 1),
            Err(ValidationError::TooLarge {
                size: MAX_IMAGE_BYTES + 1,
                limit: MAX_IMAGE_BYTES,
            })
        );
    }

    #[test]
    fn test_rejects_non_images() {
        assert_eq!(
            validate_image("application/pdf", 10),
            Err(ValidationError::NotAnImage("application/pdf".into()))
        );
        assert!(ImageUpload::new("notes.txt", "text/plain", vec![1, 2, 3]).is_err());
    }

    #[test]
    fn test_object_path() {
        let upload = ImageUpload::new("shot.webp", "image/webp", vec![0; 16]).unwrap();
        assert_eq!(upload.object_path(), "projects/shot.webp");
    }

    #[test]
    fn test_rejects_path_like_names() {
        assert_eq!(
            ImageUpload::new("../etc.png", "image/png", vec![0]),
            Err(ValidationError::InvalidFileName("../etc.png".into()))
        );
    }

    #[test]
    fn test_mime_guess() {
        assert_eq!(image_mime_for("Cover.JPG"), Some("image/jpeg"));
        assert_eq!(image_mime_for("logo.svg"), Some("image/svg+xml"));
        assert_eq!(image_mime_for("README"), None);
        assert_eq!(image_mime_for("archive.zip"), None);
    }
}
