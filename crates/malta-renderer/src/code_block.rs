//! Link directives in fenced code blocks.
//!
//! A fenced block may open with any number of directive lines:
//!
//! ```text
//! //$Config=/reference/config
//! //$Server=https://example.com/server
//! ```
//!
//! Each defines `token → target`. Directive lines are removed from the
//! rendered block, and every `$$token` in the remaining code becomes a link.
//!
//! Directives are collected in a separate pass over the parsed events
//! ([`CodeBlockAnnotations::from_events`]), keyed by the block's position
//! among the document's fenced blocks. The renderer only reads them.

use pulldown_cmark::{CodeBlockKind, Event, Tag, TagEnd};

/// Prefix that marks a directive line.
pub const DIRECTIVE_MARKER: &str = "//$";

/// A `token → target` link definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeLink {
    /// Identifier written as `$$token` in the code.
    pub token: String,
    /// Link target (`href`).
    pub target: String,
}

/// A fenced code block with its directives split off.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FencedCodeBlock {
    /// Language tag from the fence info string (first word), possibly empty.
    pub language: String,
    /// Block content without the leading directive lines.
    pub code: String,
    /// Links in definition order. A redefined token keeps its first position.
    pub links: Vec<CodeLink>,
    /// Number of leading directive lines, malformed ones included.
    pub directive_count: usize,
}

impl FencedCodeBlock {
    /// Split a block's raw content into directives and code.
    ///
    /// Scanning stops at the first line that does not start with
    /// [`DIRECTIVE_MARKER`]. A directive whose payload is not exactly
    /// `token=target` is still stripped, but defines nothing.
    #[must_use]
    pub fn parse(language: &str, source: &str) -> Self {
        let mut links: Vec<CodeLink> = Vec::new();
        let mut directive_count = 0;
        let mut code_start = 0;

        for line in source.split_inclusive('\n') {
            let Some(payload) = line.strip_prefix(DIRECTIVE_MARKER) else {
                break;
            };
            directive_count += 1;
            code_start += line.len();

            let parts: Vec<&str> = payload.trim().split('=').collect();
            let [token, target] = parts.as_slice() else {
                tracing::debug!(directive = line.trim_end(), "Ignoring malformed code link");
                continue;
            };

            match links.iter_mut().find(|link| link.token == *token) {
                Some(link) => (*target).clone_into(&mut link.target),
                None => links.push(CodeLink {
                    token: (*token).to_owned(),
                    target: (*target).to_owned(),
                }),
            }
        }

        Self {
            language: language.to_owned(),
            code: source[code_start..].to_owned(),
            links,
            directive_count,
        }
    }
}

/// Directive data for every fenced code block of one document.
///
/// Index `n` holds the `n`-th fenced block in document order. Indented
/// code blocks are not counted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeBlockAnnotations {
    blocks: Vec<FencedCodeBlock>,
}

impl CodeBlockAnnotations {
    /// Collect annotations from a parsed event stream.
    #[must_use]
    pub fn from_events(events: &[Event<'_>]) -> Self {
        let mut blocks = Vec::new();
        let mut current: Option<(String, String)> = None;

        for event in events {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                    current = Some((fence_language(info).to_owned(), String::new()));
                }
                Event::Text(text) => {
                    if let Some((_, source)) = current.as_mut() {
                        source.push_str(text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((language, source)) = current.take() {
                        blocks.push(FencedCodeBlock::parse(&language, &source));
                    }
                }
                _ => {}
            }
        }

        Self { blocks }
    }

    /// Annotation for the fenced block at `ordinal`.
    #[must_use]
    pub fn get(&self, ordinal: usize) -> Option<&FencedCodeBlock> {
        self.blocks.get(ordinal)
    }

    /// Number of fenced blocks in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Language tag: the info string up to the first whitespace.
pub(crate) fn fence_language(info: &str) -> &str {
    info.split_whitespace().next().unwrap_or("")
}
