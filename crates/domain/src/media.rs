use crate::CreateError;

#[allow(async_fn_in_trait)]
pub trait MediaRepository {
    /// Stores a video blob and returns its public URL.
    async fn upload_video(
        &self,
        name: &str,
        video: Vec<u8>,
        content_type: &str,
    ) -> Result<String, CreateError>;
}
