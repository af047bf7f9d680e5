//! Page decorations: smooth in-page scrolling, image fade-in and product
//! card hover lift.

use std::collections::BTreeSet;

/// Transform applied to a product card under the pointer.
pub const CARD_HOVER_TRANSFORM: &str = "translateY(-10px)";
/// Transform of a product card at rest.
pub const CARD_REST_TRANSFORM: &str = "translateY(0)";
/// Class added to an image once it has loaded.
pub const IMAGE_LOADED_CLASS: &str = "loaded";

/// How the viewport moves to a scroll target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
}

/// Which edge of the target aligns with the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBlock {
    Start,
}

/// A request to scroll an element into view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRequest {
    /// Element id, without the leading `#`.
    pub target: String,
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

/// Resolves in-page anchor clicks against the sections present on the page.
#[derive(Debug, Clone, Default)]
pub struct SmoothScroll {
    sections: BTreeSet<String>,
}

impl SmoothScroll {
    /// Track the given section ids.
    pub fn new<I, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sections: sections.into_iter().map(Into::into).collect(),
        }
    }

    /// The scroll an anchor click should perform, if its target exists.
    #[must_use]
    pub fn resolve(&self, href: &str) -> Option<ScrollRequest> {
        let target = href.strip_prefix('#')?;
        if !self.sections.contains(target) {
            return None;
        }
        Some(ScrollRequest {
            target: target.to_owned(),
            behavior: ScrollBehavior::Smooth,
            block: ScrollBlock::Start,
        })
    }
}

/// Transform for a product card given whether the pointer is over it.
#[must_use]
pub const fn card_transform(hovered: bool) -> &'static str {
    if hovered {
        CARD_HOVER_TRANSFORM
    } else {
        CARD_REST_TRANSFORM
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_section() {
        let scroll = SmoothScroll::new(["products", "about"]);
        let request = scroll.resolve("#products").unwrap();
        assert_eq!(request.target, "products");
        assert_eq!(request.behavior, ScrollBehavior::Smooth);
        assert_eq!(request.block, ScrollBlock::Start);
    }

    #[test]
    fn test_resolve_unknown_or_external() {
        let scroll = SmoothScroll::new(["products"]);
        assert_eq!(scroll.resolve("#missing"), None);
        assert_eq!(scroll.resolve("#"), None);
        assert_eq!(scroll.resolve("/about"), None);
    }

    #[test]
    fn test_card_transform() {
        assert_eq!(card_transform(true), "translateY(-10px)");
        assert_eq!(card_transform(false), "translateY(0)");
    }
}
