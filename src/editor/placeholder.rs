//! Placeholder visibility for the editable region.

use web_sys::HtmlElement;

/// Class that shows the CSS placeholder.
pub const EMPTY_CLASS: &str = "editable-area-empty";

/// Markup the browser leaves behind in a region that looks empty.
const VISUALLY_EMPTY: &[&str] = &[
    "",
    "<br>",
    "<p></p>",
    "<b><br></b>",
    "<i><br></i>",
    "<u><br></u>",
    "<b></b>",
    "<i></i>",
    "<u></u>",
];

/// Whether `markup` (surrounding whitespace ignored) renders as nothing.
pub fn is_visually_empty(markup: &str) -> bool {
    VISUALLY_EMPTY.contains(&markup.trim())
}

/// Toggle the placeholder class from the region's current markup.
pub fn sync(region: &HtmlElement) {
    let empty = is_visually_empty(&region.inner_html());
    if let Err(e) = region.class_list().toggle_with_force(EMPTY_CLASS, empty) {
        log::warn!("placeholder toggle failed: {:?}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patterns() {
        for markup in VISUALLY_EMPTY {
            assert!(is_visually_empty(markup), "{:?}", markup);
        }
        assert!(is_visually_empty("  <br>\n"));
    }

    #[test]
    fn test_content_is_not_empty() {
        for markup in [
            "Hello",
            "<b>x</b>",
            "<br><br>",
            "<div><br></div>",
            "&nbsp;",
            "<p> </p>",
            "<b><i></i></b>",
        ] {
            assert!(!is_visually_empty(markup), "{:?}", markup);
        }
    }
}
