use anyhow::Context;

pub(crate) type StoryId = i64;

/// The parts of a Hacker News item the widget renders. Nothing is validated, a
/// missing field stays `None`.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub(crate) struct StoryDetails {
    pub(crate) title: Option<String>,
    pub(crate) url: Option<String>,
}

pub(crate) trait HnSource {
    async fn top_stories(&self) -> anyhow::Result<Vec<StoryId>>;

    async fn item(&self, id: StoryId) -> anyhow::Result<StoryDetails>;
}

#[derive(Debug, Clone)]
pub(crate) struct HnClient {
    base_url: String,
}

impl HnClient {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn top_stories_url(&self) -> String {
        format!("{}/topstories.json?print=pretty", self.base_url)
    }

    fn item_url(&self, id: StoryId) -> String {
        format!("{}/item/{}.json?print=pretty", self.base_url, id)
    }
}

impl Default for HnClient {
    fn default() -> Self {
        Self::new(crate::config::config().api_base_url.clone())
    }
}

impl HnSource for HnClient {
    async fn top_stories(&self) -> anyhow::Result<Vec<StoryId>> {
        let url = self.top_stories_url();
        tracing::debug!(url = url, "Requesting top stories");

        let response = crate::CLIENT.get(&url).send().await?.error_for_status()?;
        let stories = response
            .json::<Vec<StoryId>>()
            .await
            .with_context(|| format!("Malformed story list from {url}"))?;

        Ok(stories)
    }

    async fn item(&self, id: StoryId) -> anyhow::Result<StoryDetails> {
        let url = self.item_url(id);
        tracing::debug!(url = url, story_id = id, "Requesting story");

        let response = crate::CLIENT.get(&url).send().await?.error_for_status()?;
        let story = response
            .json::<StoryDetails>()
            .await
            .with_context(|| format!("Malformed story {id} from {url}"))?;

        Ok(story)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let client = HnClient::new(crate::config::DEFAULT_API_BASE_URL);

        assert_eq!(
            client.top_stories_url(),
            "https://hacker-news.firebaseio.com/v0/topstories.json?print=pretty"
        );
        assert_eq!(
            client.item_url(8863),
            "https://hacker-news.firebaseio.com/v0/item/8863.json?print=pretty"
        );
    }

    #[test]
    fn test_story_details_ignores_other_fields() {
        let json = r#"{
            "by" : "dhouston",
            "descendants" : 71,
            "id" : 8863,
            "kids" : [ 8952, 9224 ],
            "score" : 111,
            "time" : 1175714200,
            "title" : "My YC app: Dropbox - Throw away your USB drive",
            "type" : "story",
            "url" : "http://www.getdropbox.com/u/2/screencast.html"
        }"#;

        let story: StoryDetails = serde_json::from_str(json).unwrap();
        assert_eq!(
            story,
            StoryDetails {
                title: Some("My YC app: Dropbox - Throw away your USB drive".to_string()),
                url: Some("http://www.getdropbox.com/u/2/screencast.html".to_string()),
            }
        );
    }

    #[test]
    fn test_story_details_missing_fields() {
        // Ask HN posts have no url.
        let json = r#"{"id": 121003, "title": "Ask HN: The Arc Effect", "type": "story"}"#;
        let story: StoryDetails = serde_json::from_str(json).unwrap();

        assert_eq!(story.title.as_deref(), Some("Ask HN: The Arc Effect"));
        assert_eq!(story.url, None);
    }

    #[tokio::test]
    async fn test_top_stories_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/topstories.json?print=pretty")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[ 111, 222, 333 ]")
            .expect(1)
            .create_async()
            .await;

        let stories = HnClient::new(server.url()).top_stories().await.unwrap();

        assert_eq!(stories, vec![111, 222, 333]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_item_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/item/111.json?print=pretty")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 111, "title": "Example", "url": "https://example.com"}"#)
            .expect(1)
            .create_async()
            .await;

        let story = HnClient::new(server.url()).item(111).await.unwrap();

        assert_eq!(story.title.as_deref(), Some("Example"));
        assert_eq!(story.url.as_deref(), Some("https://example.com"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_err() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/topstories.json?print=pretty")
            .with_status(500)
            .with_body("[ 111 ]")
            .create_async()
            .await;

        assert!(HnClient::new(server.url()).top_stories().await.is_err());
    }

    #[tokio::test]
    async fn test_malformed_listing_is_err() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/topstories.json?print=pretty")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Permission denied"}"#)
            .create_async()
            .await;

        let err = HnClient::new(server.url()).top_stories().await.unwrap_err();
        assert!(err.to_string().contains("Malformed story list"));
    }

    #[tokio::test]
    async fn test_missing_item_is_err() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/item/404.json?print=pretty")
            .with_status(404)
            .create_async()
            .await;

        assert!(HnClient::new(server.url()).item(404).await.is_err());
    }

    #[test]
    fn test_story_list() {
        let stories: Vec<StoryId> = serde_json::from_str("[ 111, 222, 333 ]\n").unwrap();
        assert_eq!(stories, vec![111, 222, 333]);
    }
}
