/// Renders the link for a story. Fields are embedded as-is, a missing field shows up as
/// `undefined`.
pub(crate) fn render_anchor(story: &crate::hn_api::StoryDetails) -> String {
    format!(
        "<a href=\"{}\">{}</a>",
        story.url.as_deref().unwrap_or("undefined"),
        story.title.as_deref().unwrap_or("undefined"),
    )
}

/// Links the current top Hacker News story from an element of the host page.
#[derive(Debug)]
pub(crate) struct TopStoryWidget<S> {
    source: S,
    element_id: String,
}

impl<S: crate::hn_api::HnSource> TopStoryWidget<S> {
    pub(crate) fn new(source: S, element_id: impl Into<String>) -> Self {
        Self {
            source,
            element_id: element_id.into(),
        }
    }

    /// Fetches the top story and renders its link without touching any page.
    pub(crate) async fn fetch_anchor(&self) -> anyhow::Result<String> {
        let stories = self.source.top_stories().await?;
        tracing::info!(num_stories = stories.len(), "Got top stories");

        let Some(&story_id) = stories.first() else {
            anyhow::bail!("Top stories listing is empty");
        };

        let story = self.source.item(story_id).await?;
        tracing::info!(
            story_id = story_id,
            title = story.title.as_deref(),
            url = story.url.as_deref(),
            "Got top story"
        );

        Ok(render_anchor(&story))
    }

    /// Runs the widget once against the page. Calling it again repeats both requests and
    /// overwrites whatever the previous run wrote.
    pub(crate) async fn init(&self, page: &mut impl crate::page::Page) -> anyhow::Result<()> {
        let anchor = self.fetch_anchor().await?;

        match page.replace_inner_html(&self.element_id, &anchor)? {
            Some(previous) => tracing::info!(
                element = self.element_id,
                previous = as_plain_text(&previous),
                anchor = anchor,
                "Updated element"
            ),
            None => tracing::info!(element = self.element_id, "Nothing to update"),
        }

        Ok(())
    }
}

fn as_plain_text(html: &str) -> String {
    html2text::config::plain()
        .string_from_read(html.as_bytes(), 80)
        .map(|text| text.trim().to_string())
        .unwrap_or_else(|_| html.to_string())
}
