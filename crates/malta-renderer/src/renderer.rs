//! Markdown to HTML rendering.
//!
//! The document is parsed once into an event list. [`CodeBlockAnnotations`]
//! is collected from it, then the events are rewritten (heading IDs,
//! highlighted code blocks, omitted raw HTML) and serialized by
//! `pulldown_cmark::html`. Tables are wrapped last.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::code_block::CodeBlockAnnotations;
use crate::highlight::render_code_block;
use crate::html::{HeadingIds, wrap_tables};

/// Placeholder emitted instead of raw HTML found in Markdown sources.
const RAW_HTML_OMITTED: &str = "<!-- raw HTML omitted -->";

/// Error returned when Markdown cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The syntax highlighter failed on a code block.
    #[error("Syntax highlighting failed: {0}")]
    Highlight(#[from] syntect::Error),
    /// The highlight theme is not bundled.
    #[error("Highlight theme not found: {0}")]
    ThemeNotFound(&'static str),
}

/// CommonMark + tables renderer.
#[derive(Clone, Debug)]
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    /// Create a renderer with the table extension enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES,
        }
    }

    /// Render a Markdown body (without front matter) to an HTML fragment.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Highlight`] if a code block fails to highlight.
    pub fn render_markdown(&self, markdown: &str) -> Result<String, RenderError> {
        let events: Vec<Event<'_>> = Parser::new_ext(markdown, self.options).collect();
        let annotations = CodeBlockAnnotations::from_events(&events);
        let events = rewrite_events(events, &annotations)?;

        let mut html = String::with_capacity(markdown.len() * 3 / 2);
        pulldown_cmark::html::push_html(&mut html, events.into_iter());
        Ok(wrap_tables(&html))
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Heading being buffered until its text is known.
struct PendingHeading<'a> {
    level: HeadingLevel,
    classes: Vec<CowStr<'a>>,
    attrs: Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
    inner: Vec<Event<'a>>,
}

impl<'a> PendingHeading<'a> {
    fn text(&self) -> String {
        self.inner
            .iter()
            .filter_map(|event| match event {
                Event::Text(text) | Event::Code(text) => Some(text.as_ref()),
                _ => None,
            })
            .collect()
    }

    fn finish(self, id: String, output: &mut Vec<Event<'a>>) {
        let level = self.level;
        output.push(Event::Start(Tag::Heading {
            level,
            id: Some(id.into()),
            classes: self.classes,
            attrs: self.attrs,
        }));
        output.extend(self.inner);
        output.push(Event::End(TagEnd::Heading(level)));
    }
}

fn rewrite_events<'a>(
    events: Vec<Event<'a>>,
    annotations: &CodeBlockAnnotations,
) -> Result<Vec<Event<'a>>, RenderError> {
    let mut output = Vec::with_capacity(events.len());
    let mut ids = HeadingIds::default();
    let mut heading: Option<PendingHeading<'a>> = None;
    let mut fenced_ordinal = 0;
    let mut in_fenced_block = false;
    let mut in_html_block = false;

    for event in events {
        let event = match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(_))) => {
                if let Some(block) = annotations.get(fenced_ordinal) {
                    output.push(Event::Html(render_code_block(block)?.into()));
                }
                fenced_ordinal += 1;
                in_fenced_block = true;
                continue;
            }
            Event::End(TagEnd::CodeBlock) if in_fenced_block => {
                in_fenced_block = false;
                continue;
            }
            _ if in_fenced_block => continue,

            Event::Start(Tag::HtmlBlock) => {
                in_html_block = true;
                Event::Html(format!("{RAW_HTML_OMITTED}\n").into())
            }
            Event::End(TagEnd::HtmlBlock) => {
                in_html_block = false;
                continue;
            }
            Event::Html(_) if in_html_block => continue,
            Event::Html(_) | Event::InlineHtml(_) => Event::InlineHtml(RAW_HTML_OMITTED.into()),

            Event::Start(Tag::Heading {
                level,
                classes,
                attrs,
                ..
            }) => {
                heading = Some(PendingHeading {
                    level,
                    classes,
                    attrs,
                    inner: Vec::new(),
                });
                continue;
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(pending) = heading.take() {
                    let id = ids.generate(&pending.text());
                    pending.finish(id, &mut output);
                }
                continue;
            }
            other => other,
        };

        match heading.as_mut() {
            Some(pending) => pending.inner.push(event),
            None => output.push(event),
        }
    }

    Ok(output)
}
