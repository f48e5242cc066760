//! HTML page template.

use std::fmt::Write;

use malta_config::NavSection;
use malta_renderer::escape_html as escape;

use crate::assets::SiteAssets;

/// All data needed to render a page.
pub struct PageData<'a> {
    /// Page title (`<title>` and `og:title`).
    pub title: &'a str,
    /// Description for meta tags.
    pub description: &'a str,
    /// Site name, shown in the sidebar and `og:site_name`.
    pub site_name: &'a str,
    /// Absolute page URL.
    pub url: &'a str,
    pub twitter: Option<&'a str>,
    pub nav_sections: &'a [NavSection],
    /// Sidebar href marked with `aria-current="page"`.
    pub current_href: Option<&'a str>,
    pub assets: &'a SiteAssets,
    /// Rendered Markdown, inserted as is.
    pub html_content: &'a str,
}

/// Render a complete HTML page.
pub fn render_page(page: &PageData<'_>) -> String {
    let mut html = String::with_capacity(page.html_content.len() + 4096);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape(page.title));
    render_meta(&mut html, page);
    if let Some(href) = page.assets.favicon_href.as_deref() {
        let _ = writeln!(html, "<link rel=\"icon\" href=\"{}\">", escape(href));
    }
    for href in &page.assets.stylesheets {
        let _ = writeln!(html, "<link rel=\"stylesheet\" href=\"{}\">", escape(href));
    }
    html.push_str("</head>\n<body>\n");

    html.push_str("<div id=\"layout\">\n");
    render_sidebar(&mut html, page);
    html.push_str("<main id=\"content\">\n<article class=\"markdown\">\n");
    html.push_str(page.html_content);
    html.push_str("\n</article>\n</main>\n");
    html.push_str("</div>\n");

    html.push_str("</body>\n</html>\n");
    html
}

/// Description, Open Graph and Twitter card tags.
fn render_meta(html: &mut String, page: &PageData<'_>) {
    let title = escape(page.title);
    let description = escape(page.description);

    let _ = writeln!(html, "<meta name=\"description\" content=\"{description}\">");
    let _ = writeln!(html, "<link rel=\"canonical\" href=\"{}\">", escape(page.url));
    html.push_str("<meta property=\"og:type\" content=\"website\">\n");
    let _ = writeln!(
        html,
        "<meta property=\"og:site_name\" content=\"{}\">",
        escape(page.site_name)
    );
    let _ = writeln!(html, "<meta property=\"og:title\" content=\"{title}\">");
    let _ = writeln!(
        html,
        "<meta property=\"og:description\" content=\"{description}\">"
    );
    let _ = writeln!(html, "<meta property=\"og:url\" content=\"{}\">", escape(page.url));

    match page.assets.og_image_url.as_deref() {
        Some(image) => {
            let _ = writeln!(html, "<meta property=\"og:image\" content=\"{}\">", escape(image));
            html.push_str("<meta name=\"twitter:card\" content=\"summary_large_image\">\n");
        }
        None => html.push_str("<meta name=\"twitter:card\" content=\"summary\">\n"),
    }
    if let Some(handle) = page.twitter {
        let _ = writeln!(html, "<meta name=\"twitter:site\" content=\"{}\">", escape(handle));
    }
}

fn render_sidebar(html: &mut String, page: &PageData<'_>) {
    html.push_str("<nav id=\"sidebar\">\n");

    html.push_str("<a id=\"site-name\" href=\"/\">");
    if let Some(src) = page.assets.logo_src.as_deref() {
        let _ = write!(html, "<img src=\"{}\" alt=\"\">", escape(src));
    }
    let _ = writeln!(html, "<span>{}</span></a>", escape(page.site_name));

    for section in page.nav_sections {
        html.push_str("<div class=\"nav-section\">\n");
        let _ = writeln!(
            html,
            "<p class=\"nav-section-title\">{}</p>",
            escape(&section.title)
        );
        html.push_str("<ul>\n");
        for nav_page in &section.pages {
            let current = if page.current_href == Some(nav_page.href.as_str()) {
                " aria-current=\"page\""
            } else {
                ""
            };
            let _ = writeln!(
                html,
                "<li><a href=\"{}\"{current}>{}</a></li>",
                escape(&nav_page.href),
                escape(&nav_page.title),
            );
        }
        html.push_str("</ul>\n</div>\n");
    }

    html.push_str("</nav>\n");
}
