use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::config::CONFIG_ELEMENT_ID;
use crate::scroll_state::Extent;

pub(crate) fn document() -> Option<Document> {
    window()?.document()
}

pub(crate) fn query(selector: &str) -> Option<Element> {
    document()?.query_selector(selector).ok().flatten()
}

pub(crate) fn query_all(selector: &str) -> Vec<Element> {
    let Some(list) = document().and_then(|document| document.query_selector_all(selector).ok()) else {
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn attr(element: &Element, name: &str) -> Option<String> {
    element.get_attribute(name)
}

/// Returns whether the class list accepted the change. Rejections (such as a
/// class containing whitespace) are reported on the console.
pub(crate) fn set_class(element: &Element, class: &str, enabled: bool) -> bool {
    let classes = element.class_list();
    let result = if enabled {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
    report_rejected("classList", result)
}

pub(crate) fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

/// Returns `false` for elements without an inline style (non-HTML elements) or
/// when the style declaration rejects the property.
pub(crate) fn set_style(element: &Element, property: &str, value: &str) -> bool {
    let Some(element) = element.dyn_ref::<HtmlElement>() else {
        return false;
    };
    report_rejected("style", element.style().set_property(property, value))
}

fn report_rejected(target: &str, result: Result<(), JsValue>) -> bool {
    match result {
        Ok(()) => true,
        Err(error) => {
            web_sys::console::debug_2(&JsValue::from_str(&format!("{target} update rejected")), &error);
            false
        }
    }
}

pub(crate) fn scroll_y(win: &Window) -> f64 {
    win.scroll_y().unwrap_or(0.0)
}

pub(crate) fn viewport_height(win: &Window) -> f64 {
    win.inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0)
}

pub(crate) fn document_extent(element: &Element, scroll_y: f64) -> Extent {
    let rect = element.get_bounding_client_rect();
    Extent::new(rect.top() + scroll_y, rect.height())
}

pub(crate) fn smooth_scroll_to(top: f64) {
    let Some(win) = window() else {
        return;
    };

    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    win.scroll_to_with_scroll_to_options(&options);
}

pub(crate) fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

pub(crate) fn config_source() -> Option<String> {
    document()?
        .get_element_by_id(CONFIG_ELEMENT_ID)?
        .text_content()
}

pub(crate) fn now_ms() -> f64 {
    js_sys::Date::now()
}
