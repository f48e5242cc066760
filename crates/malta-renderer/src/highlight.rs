//! Syntax highlighting for fenced code blocks.
//!
//! Highlighted code is emitted as class-annotated spans (`ClassStyle::Spaced`),
//! so colors come from a stylesheet generated by [`theme_css`].

use std::sync::LazyLock;

use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::code_block::{CodeLink, FencedCodeBlock};
use crate::html::escape_html;
use crate::renderer::RenderError;

/// Theme used for the generated highlight stylesheet.
pub const HIGHLIGHT_THEME: &str = "InspiredGitHub";

/// syntect defaults plus the extra grammars (TypeScript, TSX, TOML, ...).
static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(two_face::syntax::extra_newlines);

fn find_syntax(language: &str) -> Option<&'static SyntaxReference> {
    if language.is_empty() {
        return None;
    }
    SYNTAX_SET.find_syntax_by_token(language)
}

/// Render a fenced block as `<pre class="codeblock"><code>…</code></pre>`.
///
/// Blocks in a known language are highlighted and get their `$$token` links
/// applied. Anything else is emitted as escaped plain text, links untouched.
///
/// # Errors
///
/// Returns [`RenderError::Highlight`] if the highlighter fails on the input.
pub fn render_code_block(block: &FencedCodeBlock) -> Result<String, RenderError> {
    let inner = match find_syntax(&block.language) {
        Some(syntax) => {
            let mut generator =
                ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, ClassStyle::Spaced);
            for line in LinesWithEndings::from(&block.code) {
                generator.parse_html_for_line_which_includes_newline(line)?;
            }
            link_tokens(&generator.finalize(), &block.links)
        }
        None => {
            tracing::trace!(language = %block.language, "No syntax found, emitting plain code");
            escape_html(&block.code)
        }
    };
    Ok(format!("<pre class=\"codeblock\"><code>{inner}</code></pre>\n"))
}

/// Replace every `$$token` with `<a href="target">token</a>`.
///
/// Links are applied in definition order as plain substring replacements.
#[must_use]
pub fn link_tokens(html: &str, links: &[CodeLink]) -> String {
    links.iter().fold(html.to_owned(), |html, link| {
        html.replace(
            &format!("$${}", link.token),
            &format!(
                "<a href=\"{}\">{}</a>",
                escape_html(&link.target),
                link.token
            ),
        )
    })
}

/// Stylesheet for the highlight classes, generated from [`HIGHLIGHT_THEME`].
///
/// # Errors
///
/// Returns [`RenderError::ThemeNotFound`] if the theme is not bundled, or
/// [`RenderError::Highlight`] if CSS generation fails.
pub fn theme_css() -> Result<String, RenderError> {
    let themes = ThemeSet::load_defaults();
    let theme = themes
        .themes
        .get(HIGHLIGHT_THEME)
        .ok_or(RenderError::ThemeNotFound(HIGHLIGHT_THEME))?;
    Ok(css_for_theme_with_class_style(theme, ClassStyle::Spaced)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn block(language: &str, source: &str) -> FencedCodeBlock {
        FencedCodeBlock::parse(language, source)
    }

    #[test]
    fn test_link_tokens_in_definition_order() {
        let links = vec![
            CodeLink {
                token: "Foo".to_owned(),
                target: "/foo".to_owned(),
            },
            CodeLink {
                token: "Bar".to_owned(),
                target: "https://x/bar".to_owned(),
            },
        ];
        let html = link_tokens("$$Foo and $$Bar and $$Foo, not Foo", &links);
        assert_eq!(
            html,
            "<a href=\"/foo\">Foo</a> and <a href=\"https://x/bar\">Bar</a> and \
             <a href=\"/foo\">Foo</a>, not Foo"
        );
    }

    #[test]
    fn test_link_tokens_without_links() {
        assert_eq!(link_tokens("$$Foo", &[]), "$$Foo");
    }

    #[test]
    fn test_unknown_language_is_escaped() {
        let html = render_code_block(&block("no-such-lang", "<b>&</b>\n")).unwrap();
        assert_eq!(
            html,
            "<pre class=\"codeblock\"><code>&lt;b&gt;&amp;&lt;/b&gt;\n</code></pre>\n"
        );
    }

    #[test]
    fn test_unknown_language_skips_links() {
        let html = render_code_block(&block("", "//$Foo=/foo\ncall $$Foo\n")).unwrap();
        assert!(html.contains("call $$Foo"));
        assert!(!html.contains("<a "));
        assert!(!html.contains("//$"));
    }

    #[test]
    fn test_known_language_is_highlighted() {
        let html = render_code_block(&block("go", "func main() {}\n")).unwrap();
        assert!(html.starts_with("<pre class=\"codeblock\"><code><span class=\""));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_directive_is_stripped_and_plain_token_untouched() {
        let html = render_code_block(&block("go", "//$Foo=https://x\nfunc Foo(){}\n")).unwrap();
        assert!(!html.contains("//$"));
        assert!(!html.contains("https://x"));
        assert!(html.contains("Foo"));
    }

    #[test]
    fn test_token_in_comment_becomes_link() {
        let html =
            render_code_block(&block("go", "//$Foo=https://x\n// calls $$Foo\nfunc Foo(){}\n"))
                .unwrap();
        assert!(html.contains("<a href=\"https://x\">Foo</a>"));
        assert!(!html.contains("$$Foo"));
    }

    #[test]
    fn test_extra_languages_are_highlighted() {
        for language in ["ts", "tsx", "toml"] {
            assert!(find_syntax(language).is_some(), "no syntax for {language}");
        }
    }

    #[test]
    fn test_typescript_token_becomes_link() {
        let html =
            render_code_block(&block("ts", "//$Foo=https://x\n// $$Foo\nconst a = 1;\n"))
                .unwrap();
        assert!(html.contains("<span class=\""));
        assert!(html.contains("<a href=\"https://x\">Foo</a>"));
        assert!(!html.contains("$$Foo"));
    }

    #[test]
    fn test_theme_css() {
        let css = theme_css().unwrap();
        assert!(css.contains("color"));
    }
}
