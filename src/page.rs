//! Host page the widget writes into. Only a single operation is needed: swap the content of
//! one element, looked up by its `id` attribute.
//!
//! A page without the element is not an error, the write is simply dropped, the same as a
//! selector that matches nothing in a browser.
use anyhow::Context;

pub(crate) trait Page {
    /// Replaces the content of the element with the given id. Returns the previous content,
    /// or `None` when there was nothing to replace.
    fn replace_inner_html(
        &mut self,
        element_id: &str,
        markup: &str,
    ) -> anyhow::Result<Option<String>>;
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// A parsed HTML document. Once modified it is serialized back from the parsed tree, so
/// markup is normalized the way a browser would normalize it.
#[derive(Debug)]
pub(crate) struct HtmlDocument {
    html: scraper::Html,
    changed: bool,
}

impl HtmlDocument {
    pub(crate) fn new(source: &str) -> Self {
        let html = scraper::Html::parse_document(source);
        if !html.errors.is_empty() {
            tracing::debug!(errors =? html.errors, "Page parsed with errors");
        }

        Self {
            html,
            changed: false,
        }
    }

    pub(crate) fn to_html(&self) -> String {
        self.html.html()
    }

    pub(crate) fn is_changed(&self) -> bool {
        self.changed
    }

    pub(crate) fn inner_html(&self, element_id: &str) -> Option<String> {
        self.find(element_id).map(|element| element.inner_html())
    }

    fn find(&self, element_id: &str) -> Option<scraper::ElementRef<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(scraper::ElementRef::wrap)
            .find(|element| element.value().id() == Some(element_id))
    }
}

impl Page for HtmlDocument {
    fn replace_inner_html(
        &mut self,
        element_id: &str,
        markup: &str,
    ) -> anyhow::Result<Option<String>> {
        let Some(element) = self.find(element_id) else {
            tracing::warn!(element = element_id, "Element not found in page");
            return Ok(None);
        };

        let tag = element.value().name();
        if VOID_ELEMENTS.contains(&tag) {
            tracing::warn!(element = element_id, tag = tag, "Element cannot hold content");
            return Ok(None);
        }

        let target = element.id();
        let previous = element.inner_html();

        if let Some(mut node) = self.html.tree.get_mut(target) {
            while let Some(mut child) = node.first_child() {
                child.detach();
            }
        }

        // Copy the parsed markup below the target, parent before children.
        let fragment = scraper::Html::parse_fragment(markup);
        let mut pending = vec![(fragment.root_element().id(), target)];
        while let Some((source, destination)) = pending.pop() {
            let Some(source) = fragment.tree.get(source) else {
                continue;
            };

            for child in source.children() {
                let Some(mut parent) = self.html.tree.get_mut(destination) else {
                    break;
                };
                let copied = parent.append(child.value().clone()).id();
                pending.push((child.id(), copied));
            }
        }

        self.changed = true;
        Ok(Some(previous))
    }
}

/// An HTML document backed by a file. Changes are kept in memory until [`HtmlFile::save`].
#[derive(Debug)]
pub(crate) struct HtmlFile {
    path: std::path::PathBuf,
    document: HtmlDocument,
}

impl HtmlFile {
    pub(crate) fn open(path: impl Into<std::path::PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let source = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read page {}", path.display()))?;

        Ok(Self {
            path,
            document: HtmlDocument::new(&source),
        })
    }

    /// Writes the page back. An untouched page is left as it is on disk.
    pub(crate) fn save(&self) -> anyhow::Result<()> {
        if !self.document.is_changed() {
            tracing::info!(page =? self.path, "Page unchanged, not writing");
            return Ok(());
        }

        std::fs::write(&self.path, self.document.to_html())
            .with_context(|| format!("Failed to write page {}", self.path.display()))
    }

    pub(crate) fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Page for HtmlFile {
    fn replace_inner_html(
        &mut self,
        element_id: &str,
        markup: &str,
    ) -> anyhow::Result<Option<String>> {
        self.document.replace_inner_html(element_id, markup)
    }
}
