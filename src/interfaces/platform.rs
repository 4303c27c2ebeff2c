use async_trait::async_trait;

use crate::error::Result;

/// Raw per-video metadata as reported by the upstream batched detail call.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoDetail {
    pub id: String,
    pub channel_id: String,
    pub published_at: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub views: u64,
    pub likes: u64,
    pub dislikes: u64,
}

/// A single top-level comment as reported by the upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentDetail {
    pub author: String,
    pub body: String,
    pub posted_at: String,
}

/// The seam between the search orchestration and the upstream video
/// platform. Implementations own the wire format; callers only see id
/// lists and detail records.
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    /// One search call scoped to ids only, capped at `max_results`.
    /// Results without a video identifier are dropped; an absent upstream
    /// item list reads as an empty vector.
    async fn search_ids(&self, query: &str, max_results: u32) -> Result<Vec<String>>;

    /// One batched detail call for the given ids. The upstream may
    /// reorder or drop unknown ids; the returned order is authoritative.
    async fn list_videos(&self, ids: &[String]) -> Result<Vec<VideoDetail>>;

    /// Top-level comment threads for a single video.
    async fn list_comment_threads(&self, video_id: &str) -> Result<Vec<CommentDetail>>;
}
