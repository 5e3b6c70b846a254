use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Element, KeyboardEvent};

use super::dom::{self, set_class};
use crate::config::InteractionConfig;
use crate::navigation::{scroll_target, section_id_from_href, MenuState};

const NAV_LINK_CLASS: &str = "nav__link";
const NAV_LINK_SELECTOR: &str = ".nav__link";
const NAV_TOGGLE_SELECTOR: &str = ".nav__toggle";
const NAV_MENU_SELECTOR: &str = ".nav__menu";
pub(crate) const BACK_TO_TOP_SELECTOR: &str = ".back-to-top, #back-to-top";
const IN_PAGE_ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

const NAV_LINK_ACTIVE_CLASS: &str = "nav__link--active";
const NAV_MENU_ACTIVE_CLASS: &str = "nav__menu--active";
const NAV_TOGGLE_ACTIVE_CLASS: &str = "nav__toggle--active";

pub(crate) struct NavLinks {
    links: Vec<(Element, Option<String>)>,
    active: RefCell<Option<String>>,
}

impl NavLinks {
    pub(crate) fn collect() -> Rc<Self> {
        let links = dom::query_all(NAV_LINK_SELECTOR)
            .into_iter()
            .map(|link| {
                let target = dom::attr(&link, "href")
                    .as_deref()
                    .and_then(section_id_from_href)
                    .map(ToString::to_string);
                (link, target)
            })
            .collect();

        Rc::new(Self {
            links,
            active: RefCell::new(None),
        })
    }

    pub(crate) fn active(&self) -> Option<String> {
        self.active.borrow().clone()
    }

    /// Clears every link, then marks the one pointing at `section_id`.
    /// Returns whether the active section changed.
    pub(crate) fn mark_active(&self, section_id: &str) -> bool {
        for (link, target) in &self.links {
            set_class(link, NAV_LINK_ACTIVE_CLASS, target.as_deref() == Some(section_id));
        }

        let previous = self.active.replace(Some(section_id.to_string()));
        previous.as_deref() != Some(section_id)
    }
}

fn scroll_to_section(section_id: &str, offset: f64) -> bool {
    let (Some(win), Some(section)) = (
        web_sys::window(),
        dom::document().and_then(|d| d.get_element_by_id(section_id)),
    ) else {
        return false;
    };

    let top = dom::document_extent(&section, dom::scroll_y(&win)).top;
    dom::smooth_scroll_to(scroll_target(top, offset));
    true
}

#[derive(Clone)]
struct MobileMenu {
    toggle: Option<Element>,
    menu: Option<Element>,
    state: Rc<Cell<MenuState>>,
}

impl MobileMenu {
    fn render(&self) {
        let open = self.state.get().is_open();
        if let Some(menu) = self.menu.as_ref() {
            set_class(menu, NAV_MENU_ACTIVE_CLASS, open);
        }
        if let Some(toggle) = self.toggle.as_ref() {
            set_class(toggle, NAV_TOGGLE_ACTIVE_CLASS, open);
        }
    }

    fn toggle(&self) {
        let mut state = self.state.get();
        state.toggle();
        self.state.set(state);
        self.render();
    }

    fn close(&self) {
        let mut state = self.state.get();
        if state.close() {
            self.state.set(state);
            self.render();
        }
    }
}

pub(crate) struct NavigationController {
    listeners: RefCell<Vec<EventListener>>,
}

impl NavigationController {
    pub(crate) fn init(config: &InteractionConfig, nav: Rc<NavLinks>) -> Option<Self> {
        let menu = MobileMenu {
            toggle: dom::query(NAV_TOGGLE_SELECTOR),
            menu: dom::query(NAV_MENU_SELECTOR),
            state: Rc::new(Cell::new(MenuState::default())),
        };
        let back_to_top = dom::query(BACK_TO_TOP_SELECTOR);

        if nav.links.is_empty() && menu.toggle.is_none() && back_to_top.is_none() {
            return None;
        }

        let mut listeners = Vec::new();
        let offset = config.nav_scroll_offset_px;

        if let Some(toggle) = menu.toggle.clone() {
            let menu = menu.clone();
            listeners.push(EventListener::new(&toggle, "click", move |_| menu.toggle()));
        }

        for (index, (link, _)) in nav.links.iter().enumerate() {
            let nav = nav.clone();
            let menu = menu.clone();
            listeners.push(EventListener::new_with_options(
                link,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    let Some((_, Some(section_id))) = nav.links.get(index) else {
                        return;
                    };
                    if !scroll_to_section(section_id, offset) {
                        return;
                    }
                    menu.close();
                    nav.mark_active(section_id);
                },
            ));
        }

        // Other in-page anchors (hero buttons, footer links) scroll the same way.
        for anchor in dom::query_all(IN_PAGE_ANCHOR_SELECTOR) {
            if dom::has_class(&anchor, NAV_LINK_CLASS) {
                continue;
            }
            let Some(section_id) = dom::attr(&anchor, "href")
                .as_deref()
                .and_then(section_id_from_href)
                .map(ToString::to_string)
            else {
                continue;
            };
            listeners.push(EventListener::new_with_options(
                &anchor,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    if scroll_to_section(&section_id, offset) {
                        event.prevent_default();
                    }
                },
            ));
        }

        if let Some(back_to_top) = back_to_top {
            listeners.push(EventListener::new_with_options(
                &back_to_top,
                "click",
                EventListenerOptions::enable_prevent_default(),
                |event| {
                    event.prevent_default();
                    dom::smooth_scroll_to(0.0);
                },
            ));
        }

        if let Some(document) = dom::document() {
            let menu = menu.clone();
            listeners.push(EventListener::new(&document, "keydown", move |event| {
                let is_escape = event
                    .dyn_ref::<KeyboardEvent>()
                    .is_some_and(|event| event.key() == "Escape");
                if is_escape {
                    menu.close();
                }
            }));
        }

        Some(Self {
            listeners: RefCell::new(listeners),
        })
    }

    pub(crate) fn teardown(&self) {
        self.listeners.borrow_mut().clear();
    }
}
