/// Size and content-type bounds for the two upload kinds, plus the bucket
/// uploads land in.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_image_bytes: usize,
    pub max_video_bytes: usize,
    pub allowed_image_mime_types: &'static [&'static str],
    pub allowed_video_mime_types: &'static [&'static str],
    pub bucket_name: String,
    pub object_prefix: String,
}

impl UploadPolicy {
    pub const DEFAULT_BUCKET_NAME: &'static str = "openroster-media";
    pub const DEFAULT_OBJECT_PREFIX: &'static str = "profiles";
    pub const ALLOWED_IMAGE_MIME_TYPES: &'static [&'static str] =
        &["image/jpeg", "image/png", "image/webp"];
    pub const ALLOWED_VIDEO_MIME_TYPES: &'static [&'static str] =
        &["video/mp4", "video/quicktime", "video/webm"];

    /// Bucket from `MEDIA_UPLOAD_BUCKET`, everything else fixed.
    pub fn from_env() -> Self {
        let bucket_name = std::env::var("MEDIA_UPLOAD_BUCKET")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_BUCKET_NAME.to_string());

        Self::new(bucket_name)
    }

    pub fn new(bucket_name: String) -> Self {
        Self {
            max_image_bytes: 5 * 1024 * 1024,
            max_video_bytes: 100 * 1024 * 1024,
            allowed_image_mime_types: Self::ALLOWED_IMAGE_MIME_TYPES,
            allowed_video_mime_types: Self::ALLOWED_VIDEO_MIME_TYPES,
            bucket_name,
            object_prefix: Self::DEFAULT_OBJECT_PREFIX.to_string(),
        }
    }

    pub fn check_image(&self, content_type: &str, size: usize) -> Result<(), String> {
        if !self.allowed_image_mime_types.contains(&content_type) {
            return Err(format!("unsupported image type: {content_type}"));
        }
        if size == 0 {
            return Err("empty upload".to_string());
        }
        if size > self.max_image_bytes {
            return Err(format!(
                "image exceeds the {} byte limit",
                self.max_image_bytes
            ));
        }
        Ok(())
    }

    pub fn check_video(&self, content_type: &str, size: usize) -> Result<(), String> {
        if !self.allowed_video_mime_types.contains(&content_type) {
            return Err(format!("unsupported video type: {content_type}"));
        }
        if size == 0 {
            return Err("empty upload".to_string());
        }
        if size > self.max_video_bytes {
            return Err(format!(
                "video exceeds the {} byte limit",
                self.max_video_bytes
            ));
        }
        Ok(())
    }

    /// File extension for an accepted content type.
    pub fn extension_for(content_type: &str) -> &'static str {
        match content_type {
            "image/jpeg" => "jpg",
            "image/png" => "png",
            "image/webp" => "webp",
            "video/mp4" => "mp4",
            "video/quicktime" => "mov",
            "video/webm" => "webm",
            _ => "bin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_policy_accepts_a_small_jpeg() {
        let policy = UploadPolicy::new("bucket".to_string());
        assert!(policy.check_image("image/jpeg", 1024).is_ok());
    }

    #[test]
    fn image_policy_rejects_wrong_type_and_oversize() {
        let policy = UploadPolicy::new("bucket".to_string());
        assert!(policy.check_image("video/mp4", 1024).is_err());
        assert!(policy
            .check_image("image/png", policy.max_image_bytes + 1)
            .is_err());
        assert!(policy.check_image("image/png", 0).is_err());
    }

    #[test]
    fn video_limit_is_larger_than_image_limit() {
        let policy = UploadPolicy::new("bucket".to_string());
        assert!(policy.max_video_bytes > policy.max_image_bytes);
        assert!(policy
            .check_video("video/mp4", policy.max_image_bytes + 1)
            .is_ok());
    }
}
