//! Element classification for the content walk
//!
//! Every element in the content region falls into exactly one [`NodeClass`];
//! the walk in the parent module dispatches on that class alone.

use scraper::node::Element;

/// Elements whose whole subtree is boilerplate
const BOILERPLATE_TAGS: &[&str] = &[
    "nav", "header", "footer", "aside", "script", "style", "noscript", "iframe", "template",
    "form", "svg", "button", "select",
];

/// ARIA landmark roles that mark non-content regions
const BOILERPLATE_ROLES: &[&str] = &["navigation", "banner", "contentinfo", "complementary"];

/// Class and id word parts that mark non-content regions
///
/// Class tokens are split on `-` and `_`, so `cookie-banner` and
/// `social_share` both match.
const BOILERPLATE_MARKERS: &[&str] = &[
    "navbar",
    "navigation",
    "sidebar",
    "menu",
    "breadcrumb",
    "breadcrumbs",
    "toc",
    "cookie",
    "advertisement",
    "ads",
    "share",
];

/// Classification of an element in the content region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    /// `h1`..`h4`
    Heading(u8),
    /// `p`, `td`, `th`
    Paragraph,
    /// `li`
    ListItem,
    /// Excluded with its whole subtree
    Boilerplate,
    /// Anything else; its children are walked
    Container,
}

/// Classifies an element by tag name and non-content markers
pub fn classify(element: &Element) -> NodeClass {
    if is_boilerplate(element) {
        return NodeClass::Boilerplate;
    }

    match element.name() {
        "h1" => NodeClass::Heading(1),
        "h2" => NodeClass::Heading(2),
        "h3" => NodeClass::Heading(3),
        "h4" => NodeClass::Heading(4),
        "p" | "td" | "th" => NodeClass::Paragraph,
        "li" => NodeClass::ListItem,
        _ => NodeClass::Container,
    }
}

/// Returns true if the element is structurally or explicitly non-content
pub fn is_boilerplate(element: &Element) -> bool {
    if BOILERPLATE_TAGS.contains(&element.name()) {
        return true;
    }

    if element.attr("hidden").is_some() {
        return true;
    }

    if element
        .attr("aria-hidden")
        .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
    {
        return true;
    }

    if let Some(role) = element.attr("role") {
        let role = role.trim().to_ascii_lowercase();
        if BOILERPLATE_ROLES.contains(&role.as_str()) {
            return true;
        }
    }

    if element.classes().any(has_marker) {
        return true;
    }

    element.id().is_some_and(has_marker)
}

/// Returns true if any `-`/`_` separated part of a class or id is a marker
fn has_marker(token: &str) -> bool {
    token
        .split(['-', '_'])
        .filter(|part| !part.is_empty())
        .any(|part| {
            let part = part.to_ascii_lowercase();
            BOILERPLATE_MARKERS.contains(&part.as_str())
        })
}
