use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::modules::media::application::ports::outgoing::{MediaStorage, MediaStorageError};

/// google-cloud-storage addresses buckets by resource name:
/// `projects/_/buckets/{bucket}`.
fn bucket_resource(bucket: &str) -> String {
    format!("projects/_/buckets/{}", bucket)
}

/// Uploaded objects are served straight off the public bucket.
fn public_url(bucket: &str, object_name: &str) -> String {
    format!("https://storage.googleapis.com/{}/{}", bucket, object_name)
}

fn map_write_error(msg: &str) -> MediaStorageError {
    let m = msg.to_lowercase();

    if m.contains("permission") || m.contains("forbidden") || m.contains("denied") {
        MediaStorageError::AccessDenied
    } else if m.contains("bucket") && (m.contains("not found") || m.contains("404")) {
        MediaStorageError::BucketNotFound
    } else if m.contains("invalid") || m.contains("config") || m.contains("configuration") {
        MediaStorageError::Configuration
    } else {
        MediaStorageError::Infrastructure
    }
}

/// Internal seam so the adapter is testable without mocking
/// google-cloud-storage types. Tests implement this with a fake client.
#[async_trait]
trait GcsClient: Send + Sync {
    async fn write_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), String>;
}

#[cfg(test)]
struct ArcGcsClient(Arc<dyn GcsClient>);

#[cfg(test)]
#[async_trait]
impl GcsClient for ArcGcsClient {
    async fn write_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), String> {
        self.0
            .write_object(bucket_resource, object_name, content_type, bytes)
            .await
    }
}

/// Production adapter. The client is initialized lazily on first use so
/// construction stays synchronous and credential errors surface on the
/// first upload, not at startup.
#[derive(Clone)]
pub struct GcsMediaStorage {
    client: Arc<OnceCell<Box<dyn GcsClient>>>,
    bucket_name: String,
}

impl GcsMediaStorage {
    pub fn new(bucket_name: String) -> Self {
        Self {
            client: Arc::new(OnceCell::new()),
            bucket_name,
        }
    }

    async fn get_client(&self) -> Result<&dyn GcsClient, Box<dyn std::error::Error + Send + Sync>> {
        self.client
            .get_or_try_init(|| async {
                let real_client = RealGcsClient::new().await?;
                Ok(Box::new(real_client) as Box<dyn GcsClient>)
            })
            .await
            .map(|boxed| &**boxed)
    }

    #[cfg(test)]
    fn with_client(client: Arc<dyn GcsClient>, bucket_name: String) -> Self {
        let once = OnceCell::new();
        let _ = once.set(Box::new(ArcGcsClient(client)) as Box<dyn GcsClient>);

        Self {
            client: Arc::new(once),
            bucket_name,
        }
    }
}

#[async_trait]
impl MediaStorage for GcsMediaStorage {
    async fn upload(
        &self,
        object_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, MediaStorageError> {
        let client = self
            .get_client()
            .await
            .map_err(|_| MediaStorageError::Configuration)?;

        let bucket = bucket_resource(&self.bucket_name);
        client
            .write_object(&bucket, object_name, content_type, bytes)
            .await
            .map_err(|e| map_write_error(&e))?;

        Ok(public_url(&self.bucket_name, object_name))
    }
}

struct RealGcsClient {
    storage: google_cloud_storage::client::Storage,
}

impl RealGcsClient {
    async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!("Initializing GCS client...");

        let storage = google_cloud_storage::client::Storage::builder()
            .build()
            .await
            .map_err(|e| {
                tracing::error!("Failed to build GCS storage client: {:?}", e);
                e
            })?;

        tracing::info!("GCS storage client created");
        Ok(Self { storage })
    }
}

#[async_trait]
impl GcsClient for RealGcsClient {
    async fn write_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        _content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), String> {
        self.storage
            .write_object(
                bucket_resource.to_string(),
                object_name.to_string(),
                bytes::Bytes::from(bytes),
            )
            .send_unbuffered()
            .await
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FakeGcsClient {
        last_write_call: Mutex<Option<(String, String, String, usize)>>,
        write_result: Mutex<Result<(), String>>,
    }

    impl Default for FakeGcsClient {
        fn default() -> Self {
            Self {
                last_write_call: Mutex::new(None),
                write_result: Mutex::new(Ok(())),
            }
        }
    }

    impl FakeGcsClient {
        fn set_write_result(&self, r: Result<(), String>) {
            *self.write_result.lock().unwrap() = r;
        }
    }

    #[async_trait]
    impl GcsClient for FakeGcsClient {
        async fn write_object(
            &self,
            bucket_resource: &str,
            object_name: &str,
            content_type: &str,
            bytes: Vec<u8>,
        ) -> Result<(), String> {
            *self.last_write_call.lock().unwrap() = Some((
                bucket_resource.to_string(),
                object_name.to_string(),
                content_type.to_string(),
                bytes.len(),
            ));

            self.write_result.lock().unwrap().clone()
        }
    }

    #[tokio::test]
    async fn upload_uses_the_bucket_resource_and_returns_the_public_url() {
        let fake = Arc::new(FakeGcsClient::default());
        let storage = GcsMediaStorage::with_client(fake.clone(), "openroster-media".to_string());

        let url = storage
            .upload("profiles/u1/a.jpg", "image/jpeg", vec![0u8; 32])
            .await
            .unwrap();

        assert_eq!(
            url,
            "https://storage.googleapis.com/openroster-media/profiles/u1/a.jpg"
        );

        let call = fake.last_write_call.lock().unwrap().clone().unwrap();
        assert_eq!(call.0, "projects/_/buckets/openroster-media");
        assert_eq!(call.1, "profiles/u1/a.jpg");
        assert_eq!(call.3, 32);
    }

    #[tokio::test]
    async fn upload_maps_access_denied() {
        let fake = Arc::new(FakeGcsClient::default());
        fake.set_write_result(Err("Permission denied".to_string()));

        let storage = GcsMediaStorage::with_client(fake, "openroster-media".to_string());
        let err = storage
            .upload("profiles/u1/a.jpg", "image/jpeg", vec![0u8; 32])
            .await
            .unwrap_err();

        assert!(matches!(err, MediaStorageError::AccessDenied));
    }

    #[tokio::test]
    async fn upload_maps_bucket_not_found() {
        let fake = Arc::new(FakeGcsClient::default());
        fake.set_write_result(Err("Bucket not found (404)".to_string()));

        let storage = GcsMediaStorage::with_client(fake, "openroster-media".to_string());
        let err = storage
            .upload("profiles/u1/a.jpg", "image/jpeg", vec![0u8; 32])
            .await
            .unwrap_err();

        assert!(matches!(err, MediaStorageError::BucketNotFound));
    }

    #[tokio::test]
    async fn upload_maps_infrastructure_fallback() {
        let fake = Arc::new(FakeGcsClient::default());
        fake.set_write_result(Err("some weird error".to_string()));

        let storage = GcsMediaStorage::with_client(fake, "openroster-media".to_string());
        let err = storage
            .upload("profiles/u1/a.jpg", "image/jpeg", vec![0u8; 32])
            .await
            .unwrap_err();

        assert!(matches!(err, MediaStorageError::Infrastructure));
    }
}
