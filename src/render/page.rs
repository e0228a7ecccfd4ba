//! Page shell: the site chrome around rendered fragments.

use crate::config::SiteConfig;
use crate::render::html::Fragments;

/// Client-side search filter. Inlined into static pages so nested pages need
/// no relative script path; served at `/search.js` by `ndoc serve`.
pub const SEARCH_JS: &str = include_str!("../assets/search.js");

/// Live-reload listener, served only by `ndoc serve`.
pub const LIVE_JS: &str = include_str!("../assets/live.js");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Written to disk by `ndoc build`; the search script is inlined
    Static,
    /// Served by `ndoc serve`; adds the reload listener
    Live,
}

const STYLE: &str = "\
    #app { display: flex; flex-direction: column; min-height: 100vh; }
    main { flex: 1; display: flex; }
    aside { width: 250px; padding: 1rem; background: #f5f5f5; }
    #content { flex: 1; padding: 1rem; }
    .function { margin-bottom: 2rem; }
    .params { border-collapse: collapse; }
    .params th, .params td { border: 1px solid #ddd; padding: 0.25rem 0.5rem; text-align: left; }
    #search { width: 100%; margin-bottom: 1rem; }
    header, footer { padding: 1rem; background: #f0f0f0; }
";

/// Content shown when a page has no `.ndoc` source.
pub fn not_found() -> Fragments {
    Fragments {
        sidebar: String::new(),
        content: "<h1>404</h1><p>Page not found</p>\n".to_string(),
    }
}

/// Wrap fragments in the full HTML document.
///
/// The `<title>` is the site title, falling back to the module name.
pub fn shell(site: &SiteConfig, module_name: &str, fragments: &Fragments, mode: Mode) -> String {
    let title = if site.title.is_empty() {
        module_name
    } else {
        site.title.as_str()
    };

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"UTF-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    out.push_str(&format!("<title>{}</title>\n", title));
    for url in &site.css {
        out.push_str(&format!("<link rel=\"stylesheet\" href=\"{}\">\n", url));
    }
    out.push_str("<style>\n");
    out.push_str(STYLE);
    out.push_str("</style>\n");
    out.push_str("</head>\n<body>\n<div id=\"app\">\n");

    out.push_str(&site.header_html());
    out.push('\n');

    out.push_str("<main>\n<aside>\n");
    out.push_str("<input type=\"text\" id=\"search\" placeholder=\"Search...\">\n");
    out.push_str("<nav>\n<ul id=\"nav\">\n");
    for item in &site.nav {
        out.push_str(&format!(
            "  <li><a href=\"{}\" data-path=\"{}\">{}</a></li>\n",
            item.path, item.path, item.title
        ));
    }
    out.push_str("</ul>\n</nav>\n");
    out.push_str("<div id=\"sidebar\">\n");
    out.push_str(&fragments.sidebar);
    out.push_str("</div>\n</aside>\n");

    out.push_str("<div id=\"content\">\n");
    out.push_str(&fragments.content);
    out.push_str("</div>\n</main>\n");

    out.push_str(&site.footer_html());
    out.push('\n');
    out.push_str("</div>\n");

    match mode {
        Mode::Static => {
            out.push_str("<script>\n");
            out.push_str(SEARCH_JS);
            out.push_str("</script>\n");
        }
        Mode::Live => {
            out.push_str("<script src=\"/search.js\"></script>\n");
            out.push_str("<script src=\"/live.js\"></script>\n");
        }
    }

    out.push_str("</body>\n</html>\n");
    out
}
