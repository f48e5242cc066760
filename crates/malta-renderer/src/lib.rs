//! Markdown to HTML conversion for Malta pages.
//!
//! This crate provides:
//! - [`split_front_matter`]: separates the YAML/TOML header from the Markdown body
//! - [`MarkdownRenderer`]: CommonMark + tables to HTML, with heading IDs,
//!   syntax-highlighted code blocks and wrapped tables
//!
//! # Code block links
//!
//! Fenced code blocks may start with link directives:
//!
//! ````markdown
//! ```go
//! //$Handler=/reference/handler
//! var h $$Handler
//! ```
//! ````
//!
//! Rendering happens in two phases. [`CodeBlockAnnotations`] is built first:
//! it strips the directive lines and records `token → target` per block.
//! The renderer then reads it and replaces every `$$token` in the
//! highlighted output with a link.
//!
//! # Example
//!
//! ```
//! use malta_renderer::{MarkdownRenderer, split_front_matter};
//!
//! let source = "---\ntitle: Intro\n---\n# Hi\n";
//! let (body, matter) = split_front_matter(source)?;
//! let html = MarkdownRenderer::new().render_markdown(body)?;
//!
//! assert_eq!(matter.title, "Intro");
//! assert!(html.contains(r#"<h1 id="hi">Hi</h1>"#));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod code_block;
mod front_matter;
mod highlight;
mod html;
mod renderer;

pub use code_block::{CodeBlockAnnotations, CodeLink, DIRECTIVE_MARKER, FencedCodeBlock};
pub use front_matter::{FrontMatter, FrontMatterError, split_front_matter};
pub use highlight::{HIGHLIGHT_THEME, link_tokens, render_code_block, theme_css};
pub use html::{escape_html, wrap_tables};
pub use renderer::{MarkdownRenderer, RenderError};
