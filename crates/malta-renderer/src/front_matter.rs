//! Front matter splitting.
//!
//! A page starts with a metadata header delimited by `---` (YAML) or
//! `+++` (TOML) lines:
//!
//! ```text
//! ---
//! title: Getting started
//! ---
//! # Getting started
//! ```

use serde::Deserialize;

/// Page metadata parsed from the front matter header.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    /// Page title. Required.
    pub title: String,
    /// Page description for meta tags (falls back to the site description).
    pub description: Option<String>,
}

/// Error returned when front matter is unusable.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    /// A required attribute is missing or empty.
    #[error("missing attribute: {0}")]
    MissingAttribute(&'static str),
    /// The header could not be parsed.
    #[error("invalid front matter: {0}")]
    Parse(String),
}

#[derive(Clone, Copy)]
enum Format {
    Yaml,
    Toml,
}

impl Format {
    fn from_delimiter(line: &str) -> Option<Self> {
        match line {
            "---" => Some(Self::Yaml),
            "+++" => Some(Self::Toml),
            _ => None,
        }
    }

    fn delimiter(self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }

    fn parse(self, header: &str) -> Result<FrontMatter, FrontMatterError> {
        if header.trim().is_empty() {
            return Ok(FrontMatter::default());
        }
        match self {
            Self::Yaml => serde_yaml::from_str(header)
                .map_err(|e| FrontMatterError::Parse(format!("Invalid YAML: {e}"))),
            Self::Toml => toml::from_str(header)
                .map_err(|e| FrontMatterError::Parse(format!("Invalid TOML: {e}"))),
        }
    }
}

/// Split a document into its Markdown body and front matter.
///
/// The returned body is exactly the text after the closing delimiter line.
/// A document without a (terminated) header is returned whole, with empty
/// metadata.
///
/// # Errors
///
/// Returns [`FrontMatterError::MissingAttribute`] when `title` is absent or
/// empty, and [`FrontMatterError::Parse`] when the header is malformed.
pub fn split_front_matter(source: &str) -> Result<(&str, FrontMatter), FrontMatterError> {
    let (body, matter) = match split_header(source) {
        Some((format, header, body)) => (body, format.parse(header)?),
        None => (source, FrontMatter::default()),
    };

    if matter.title.trim().is_empty() {
        return Err(FrontMatterError::MissingAttribute("title"));
    }
    Ok((body, matter))
}

/// Locate the header block. Returns `(format, header, body)`.
fn split_header(source: &str) -> Option<(Format, &str, &str)> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let first_end = source.find('\n')?;
    let format = Format::from_delimiter(source[..first_end].trim_end_matches('\r'))?;

    let header_start = first_end + 1;
    let mut offset = header_start;
    for line in source[header_start..].split_inclusive('\n') {
        let next = offset + line.len();
        if line.trim_end_matches(['\r', '\n']) == format.delimiter() {
            return Some((format, &source[header_start..offset], &source[next..]));
        }
        offset = next;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_yaml_front_matter() {
        let (body, matter) = split_front_matter("---\ntitle: Intro\n---\n# Hi\n").unwrap();
        assert_eq!(matter.title, "Intro");
        assert_eq!(matter.description, None);
        assert_eq!(body, "# Hi\n");
    }

    #[test]
    fn test_toml_front_matter() {
        let source = "+++\ntitle = \"Intro\"\ndescription = \"First steps\"\n+++\nBody";
        let (body, matter) = split_front_matter(source).unwrap();
        assert_eq!(matter.title, "Intro");
        assert_eq!(matter.description.as_deref(), Some("First steps"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_body_is_exactly_the_rest() {
        let (body, _) = split_front_matter("---\ntitle: A\n---\n\n\n---\nafter").unwrap();
        assert_eq!(body, "\n\n---\nafter");
    }

    #[test]
    fn test_crlf_line_endings() {
        let (body, matter) = split_front_matter("---\r\ntitle: A\r\n---\r\ntext").unwrap();
        assert_eq!(matter.title, "A");
        assert_eq!(body, "text");
    }

    #[test]
    fn test_quoted_title() {
        let (_, matter) = split_front_matter("---\ntitle: \"Colons: ok\"\n---\n").unwrap();
        assert_eq!(matter.title, "Colons: ok");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let (_, matter) = split_front_matter("---\ntitle: A\nauthor: someone\n---\n").unwrap();
        assert_eq!(matter.title, "A");
    }

    #[test]
    fn test_missing_title() {
        let err = split_front_matter("---\ndescription: x\n---\n# Hi").unwrap_err();
        assert!(matches!(err, FrontMatterError::MissingAttribute("title")));
        assert_eq!(err.to_string(), "missing attribute: title");
    }

    #[test]
    fn test_empty_title() {
        let err = split_front_matter("---\ntitle: \"\"\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::MissingAttribute("title")));
    }

    #[test]
    fn test_empty_header() {
        let err = split_front_matter("---\n---\n# Hi").unwrap_err();
        assert!(matches!(err, FrontMatterError::MissingAttribute("title")));
    }

    #[test]
    fn test_no_front_matter() {
        let err = split_front_matter("# Just markdown").unwrap_err();
        assert!(matches!(err, FrontMatterError::MissingAttribute("title")));
    }

    #[test]
    fn test_unterminated_front_matter() {
        let err = split_front_matter("---\ntitle: A\n# Hi").unwrap_err();
        assert!(matches!(err, FrontMatterError::MissingAttribute("title")));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = split_front_matter("---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Parse(_)));
    }
}
