#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use tubefetch::error::{Result, TubeFetchError};
use tubefetch::interfaces::platform::{CommentDetail, VideoDetail, VideoPlatform};

/// Canned upstream platform with per-method call counters.
#[derive(Default)]
pub struct StubPlatform {
    pub ids: Mutex<Vec<String>>,
    pub details: Mutex<Vec<VideoDetail>>,
    pub comments: Mutex<HashMap<String, Vec<CommentDetail>>>,
    pub fail_search: Mutex<Option<String>>,
    pub fail_comments_for: Mutex<Option<String>>,
    pub search_calls: AtomicUsize,
    pub video_calls: AtomicUsize,
    pub comment_calls: AtomicUsize,
    pub last_max_results: AtomicU32,
}

impl StubPlatform {
    pub fn with_ids(ids: &[&str]) -> Self {
        let stub = Self::default();
        *stub.ids.lock().unwrap() = ids.iter().map(|id| id.to_string()).collect();
        stub
    }

    pub fn push_detail(&self, detail: VideoDetail) {
        self.details.lock().unwrap().push(detail);
    }

    pub fn set_comments(&self, video_id: &str, comments: Vec<CommentDetail>) {
        self.comments
            .lock()
            .unwrap()
            .insert(video_id.to_string(), comments);
    }
}

#[async_trait]
impl VideoPlatform for StubPlatform {
    async fn search_ids(&self, _query: &str, max_results: u32) -> Result<Vec<String>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.last_max_results.store(max_results, Ordering::SeqCst);
        if let Some(message) = self.fail_search.lock().unwrap().clone() {
            return Err(TubeFetchError::Upstream(message));
        }
        Ok(self.ids.lock().unwrap().clone())
    }

    async fn list_videos(&self, _ids: &[String]) -> Result<Vec<VideoDetail>> {
        self.video_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.details.lock().unwrap().clone())
    }

    async fn list_comment_threads(&self, video_id: &str) -> Result<Vec<CommentDetail>> {
        self.comment_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_comments_for.lock().unwrap().as_deref() == Some(video_id) {
            return Err(TubeFetchError::Upstream(format!(
                "comments unavailable for {video_id}"
            )));
        }
        Ok(self
            .comments
            .lock()
            .unwrap()
            .get(video_id)
            .cloned()
            .unwrap_or_default())
    }
}

pub fn detail(id: &str, published_at: &str) -> VideoDetail {
    VideoDetail {
        id: id.to_string(),
        channel_id: format!("channel-{id}"),
        published_at: published_at.to_string(),
        title: format!("title-{id}"),
        description: format!("description-{id}"),
        thumbnail_url: format!("http://thumbs/{id}.jpg"),
        views: 100,
        likes: 10,
        dislikes: 1,
    }
}

pub fn comment(author: &str, posted_at: &str) -> CommentDetail {
    CommentDetail {
        author: author.to_string(),
        body: format!("{author} says hi"),
        posted_at: posted_at.to_string(),
    }
}
