//! Sidebar entry matching.

use malta_config::NavSection;

/// Find the sidebar href to mark as current for `target`.
///
/// An exact href match wins immediately. Otherwise the absolute href sharing
/// the longest run of leading path segments with `target` wins, unless
/// another href ties it or nothing is shared at all.
///
/// ```
/// use malta_config::{NavPage, NavSection};
/// use malta_site::match_closest_page;
///
/// let sections = vec![NavSection {
///     title: "Guide".to_owned(),
///     pages: vec![NavPage { title: "Basics".to_owned(), href: "/guide".to_owned() }],
/// }];
/// assert_eq!(match_closest_page(&sections, "/guide/setup"), Some("/guide"));
/// assert_eq!(match_closest_page(&sections, "/other"), None);
/// ```
pub fn match_closest_page<'a>(sections: &'a [NavSection], target: &str) -> Option<&'a str> {
    if target.is_empty() {
        return None;
    }

    let target_segments = segments(target);
    let mut best: Option<&'a str> = None;
    let mut best_depth = 0;
    let mut ties = 0;

    for page in sections.iter().flat_map(|section| &section.pages) {
        if page.href == target {
            return Some(page.href.as_str());
        }
        if !page.href.starts_with('/') {
            continue;
        }

        let depth = segments(&page.href)
            .iter()
            .zip(&target_segments)
            .take_while(|(a, b)| a == b)
            .count();

        if depth > best_depth {
            best = Some(page.href.as_str());
            best_depth = depth;
            ties = 0;
        } else if depth == best_depth && best.is_some_and(|href| href != page.href) {
            ties += 1;
        }
    }

    if best_depth == 0 || ties > 0 {
        return None;
    }
    best
}

/// Non-empty `/`-separated segments of a path.
fn segments(path: &str) -> Vec<&str> {
    path.strip_prefix('/')
        .unwrap_or(path)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect()
}
