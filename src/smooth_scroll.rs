//! Smooth scrolling for same-page fragment links.

#[cfg(test)]
#[path = "smooth_scroll_test.rs"]
mod smooth_scroll_test;

use crate::dom::{Dom, ElementId, Selector};

/// Target id of a fragment `href`, or `None` for `""`, `"#"` and non-fragments.
#[must_use]
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Anchors to bind: every `a[href^="#"]` on the page.
#[must_use]
pub fn links(dom: &mut impl Dom) -> Vec<ElementId> {
    dom.query(&Selector::FragmentLinks)
}

/// Handle a click on a fragment link.
///
/// Returns `true` when the target resolved and the scroll was started, in
/// which case default navigation must be prevented.
pub fn on_click(dom: &mut impl Dom, link: ElementId) -> bool {
    let Some(href) = dom.attribute(link, "href") else {
        return false;
    };
    let Some(id) = fragment_target(&href) else {
        return false;
    };
    let Some(target) = dom.query_first(&Selector::Id(id)) else {
        log::debug!("smooth_scroll: no element with id {id:?}");
        return false;
    };
    dom.scroll_into_view(target);
    true
}
