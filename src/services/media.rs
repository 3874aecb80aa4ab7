use async_trait::async_trait;

use crate::errors::Result;
use crate::models::post::MediaRef;

pub const POST_MEDIA_FOLDER: &str = "postImg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    pub public_id: String,
    pub url: String,
}

impl From<UploadedMedia> for MediaRef {
    fn from(media: UploadedMedia) -> Self {
        MediaRef {
            public_id: media.public_id,
            url: media.url,
        }
    }
}

/// External media host.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Uploads `payload` (data URI or remote URL); the host detects whether
    /// it is an image or a video.
    async fn upload(&self, payload: &str, folder: &str) -> Result<UploadedMedia>;

    async fn destroy(&self, public_id: &str, is_video: bool) -> Result<()>;
}
