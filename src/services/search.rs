use std::sync::Arc;

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Result;
use crate::interfaces::platform::{CommentDetail, VideoDetail, VideoPlatform};

/// A fully hydrated video: metadata plus its top-level comments. Field
/// names on the wire are the ones clients already consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: String,
    #[serde(rename = "channelid")]
    pub channel_id: String,
    #[serde(rename = "published")]
    pub published_at: String,
    pub title: String,
    pub views: u64,
    pub description: String,
    pub likes: u64,
    pub dislikes: u64,
    #[serde(rename = "thumbnail")]
    pub thumbnail_url: String,
    pub comments: Vec<CommentRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    #[serde(rename = "who_commented")]
    pub author: String,
    #[serde(rename = "content")]
    pub body: String,
    #[serde(rename = "when_posted")]
    pub posted_at: String,
}

/// Two-phase search orchestration: discover matching video ids, then
/// hydrate each id into a full record with metadata and comments.
pub struct SearchService {
    platform: Arc<dyn VideoPlatform>,
    max_results: u32,
}

impl SearchService {
    pub fn new(config: &Config, platform: Arc<dyn VideoPlatform>) -> Self {
        Self {
            platform,
            max_results: config.max_results,
        }
    }

    /// Discovery phase: one id-scoped search call, capped at the
    /// configured max results. "Zero matches" and "no upstream item
    /// list" both come back as an empty vector.
    pub async fn discover_ids(&self, query: &str) -> Result<Vec<String>> {
        self.platform.search_ids(query, self.max_results).await
    }

    /// Hydration phase: one batched detail call for the whole id set,
    /// then one comment-threads call per returned video, fanned out
    /// concurrently. Output follows the upstream detail ordering, since
    /// the upstream may reorder or drop unknown ids. Any failure aborts
    /// the whole batch; partial results are discarded.
    pub async fn hydrate_videos(&self, ids: &[String]) -> Result<Vec<VideoRecord>> {
        let details = self.platform.list_videos(ids).await?;

        let comment_calls = details
            .iter()
            .map(|detail| self.platform.list_comment_threads(&detail.id));
        let comment_sets = try_join_all(comment_calls).await?;

        let records = details
            .into_iter()
            .zip(comment_sets)
            .map(|(detail, comments)| hydrate_record(detail, comments))
            .collect();
        Ok(records)
    }

    /// Discovery then hydration. An empty id set is a successful empty
    /// result and skips hydration entirely.
    pub async fn search(&self, query: &str) -> Result<Vec<VideoRecord>> {
        let ids = self.discover_ids(query).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.hydrate_videos(&ids).await
    }
}

fn hydrate_record(detail: VideoDetail, comments: Vec<CommentDetail>) -> VideoRecord {
    VideoRecord {
        id: detail.id,
        channel_id: detail.channel_id,
        published_at: strip_zone_marker(&detail.published_at),
        title: detail.title,
        views: detail.views,
        description: detail.description,
        likes: detail.likes,
        dislikes: detail.dislikes,
        thumbnail_url: detail.thumbnail_url,
        comments: comments
            .into_iter()
            .map(|comment| CommentRecord {
                author: comment.author,
                body: comment.body,
                posted_at: strip_zone_marker(&comment.posted_at),
            })
            .collect(),
    }
}

/// Cosmetic display normalization: drop trailing zone markers from an
/// upstream timestamp. Only trailing occurrences are removed; interior
/// characters stay untouched.
fn strip_zone_marker(value: &str) -> String {
    value.trim_end_matches('Z').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_zone_markers_only() {
        assert_eq!(
            strip_zone_marker("2023-01-01T00:00:00Z"),
            "2023-01-01T00:00:00"
        );
        assert_eq!(strip_zone_marker("2023-01-01T00:00:00ZZ"), "2023-01-01T00:00:00");
        assert_eq!(strip_zone_marker("Zeta2023"), "Zeta2023");
        assert_eq!(strip_zone_marker(""), "");
    }

    #[test]
    fn record_serializes_with_wire_field_names() {
        let record = VideoRecord {
            id: "a".to_string(),
            channel_id: "c".to_string(),
            published_at: "2023-01-01T00:00:00".to_string(),
            title: "t".to_string(),
            views: 1,
            description: "d".to_string(),
            likes: 2,
            dislikes: 3,
            thumbnail_url: "http://t".to_string(),
            comments: vec![CommentRecord {
                author: "u".to_string(),
                body: "hi".to_string(),
                posted_at: "2023-01-02T00:00:00".to_string(),
            }],
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["channelid"], "c");
        assert_eq!(value["published"], "2023-01-01T00:00:00");
        assert_eq!(value["thumbnail"], "http://t");
        assert_eq!(value["comments"][0]["who_commented"], "u");
        assert_eq!(value["comments"][0]["content"], "hi");
        assert_eq!(value["comments"][0]["when_posted"], "2023-01-02T00:00:00");
    }
}
