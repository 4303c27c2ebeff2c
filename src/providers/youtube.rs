use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{Result, TubeFetchError};
use crate::interfaces::platform::{CommentDetail, VideoDetail, VideoPlatform};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// YouTube Data API v3 client. Key-authenticated, single attempt per
/// call, no retries or timeouts.
#[derive(Clone)]
pub struct YouTubePlatform {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl YouTubePlatform {
    pub fn new(api_key: impl Into<String>, base_url: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TubeFetchError::Http(e.to_string()))?;
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            api_key: api_key.into(),
            base_url,
            client,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| TubeFetchError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TubeFetchError::Upstream(format!("{status}: {body}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| TubeFetchError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl VideoPlatform for YouTubePlatform {
    async fn search_ids(&self, query: &str, max_results: u32) -> Result<Vec<String>> {
        let max_results = max_results.to_string();
        let response: SearchListResponse = self
            .get_json(
                "search",
                &[
                    ("part", "id"),
                    ("q", query),
                    ("maxResults", max_results.as_str()),
                ],
            )
            .await?;

        let ids = response
            .items
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| item.id.and_then(|id| id.video_id))
            .filter(|id| !id.is_empty())
            .collect();
        Ok(ids)
    }

    async fn list_videos(&self, ids: &[String]) -> Result<Vec<VideoDetail>> {
        let id_list = ids.join(",");
        let response: VideoListResponse = self
            .get_json(
                "videos",
                &[("part", "id,snippet,statistics"), ("id", id_list.as_str())],
            )
            .await?;

        let details = response
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|item| {
                let snippet = item.snippet.unwrap_or_default();
                let stats = item.statistics.unwrap_or_default();
                VideoDetail {
                    id: item.id,
                    channel_id: snippet.channel_id,
                    published_at: snippet.published_at,
                    title: snippet.title,
                    description: snippet.description,
                    thumbnail_url: snippet
                        .thumbnails
                        .default
                        .map(|thumb| thumb.url)
                        .unwrap_or_default(),
                    views: parse_count(stats.view_count),
                    likes: parse_count(stats.like_count),
                    dislikes: parse_count(stats.dislike_count),
                }
            })
            .collect();
        Ok(details)
    }

    async fn list_comment_threads(&self, video_id: &str) -> Result<Vec<CommentDetail>> {
        let response: CommentThreadListResponse = self
            .get_json("commentThreads", &[("part", "snippet"), ("videoId", video_id)])
            .await?;

        let comments = response
            .items
            .unwrap_or_default()
            .into_iter()
            .filter_map(|thread| thread.snippet)
            .filter_map(|snippet| snippet.top_level_comment)
            .filter_map(|comment| comment.snippet)
            .map(|snippet| CommentDetail {
                author: snippet.author_display_name,
                body: snippet.text_display,
                posted_at: snippet.published_at,
            })
            .collect();
        Ok(comments)
    }
}

// The Data API reports counters as decimal strings and omits fields it
// no longer serves (dislikeCount in particular).
fn parse_count(value: Option<String>) -> u64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Option<Vec<SearchResult>>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    id: Option<SearchResultId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResultId {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Option<Vec<VideoItem>>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    #[serde(default)]
    snippet: Option<VideoSnippet>,
    #[serde(default)]
    statistics: Option<VideoStatistics>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoSnippet {
    #[serde(default)]
    channel_id: String,
    #[serde(default)]
    published_at: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    #[serde(default)]
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    #[serde(default)]
    url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoStatistics {
    #[serde(default)]
    view_count: Option<String>,
    #[serde(default)]
    like_count: Option<String>,
    #[serde(default)]
    dislike_count: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommentThreadListResponse {
    #[serde(default)]
    items: Option<Vec<CommentThread>>,
}

#[derive(Debug, Deserialize)]
struct CommentThread {
    #[serde(default)]
    snippet: Option<ThreadSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadSnippet {
    #[serde(default)]
    top_level_comment: Option<TopLevelComment>,
}

#[derive(Debug, Deserialize)]
struct TopLevelComment {
    #[serde(default)]
    snippet: Option<CommentSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    #[serde(default)]
    author_display_name: String,
    #[serde(default)]
    text_display: String,
    #[serde(default)]
    published_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_count_handles_absent_and_garbage() {
        assert_eq!(parse_count(Some("1234".to_string())), 1234);
        assert_eq!(parse_count(Some("not a number".to_string())), 0);
        assert_eq!(parse_count(None), 0);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let platform =
            YouTubePlatform::new("key", Some("http://localhost:9/v3/".to_string())).unwrap();
        assert_eq!(platform.base_url, "http://localhost:9/v3");
    }
}
