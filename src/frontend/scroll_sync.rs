use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use web_sys::Element;

use super::dom::{self, set_class};
use super::navigation::{NavLinks, BACK_TO_TOP_SELECTOR};
use super::reveal::{SkillBars, SKILLS_SECTION_SELECTOR};
use super::schedule::{FrameScheduler, ThrottledCallback};
use crate::config::{InteractionConfig, ScrollBatching};
use crate::log::{log_event, LogLevel};
use crate::scroll_state::{derive_ui_state, ScrollInput, ScrollState, SectionLayout};

const SECTION_SELECTOR: &str = "section[id]";
const NAVBAR_SELECTOR: &str = ".navbar, .header, #navbar";

const NAVBAR_ELEVATED_CLASS: &str = "scrolled";
const BACK_TO_TOP_VISIBLE_CLASS: &str = "visible";

enum ScrollGate {
    Interval(ThrottledCallback<()>),
    Frame(FrameScheduler),
}

impl ScrollGate {
    fn request(&self) {
        match self {
            Self::Interval(throttled) => throttled.call(()),
            Self::Frame(scheduler) => scheduler.request(),
        }
    }

    fn cancel(&self) {
        match self {
            Self::Interval(throttled) => throttled.cancel(),
            Self::Frame(scheduler) => scheduler.cancel(),
        }
    }
}

pub(crate) struct ScrollSynchronizer {
    config: InteractionConfig,
    sections: Vec<(String, Element)>,
    nav: Rc<NavLinks>,
    navbar: Option<Element>,
    back_to_top: Option<Element>,
    skills_section: Option<Element>,
    skills: Option<Rc<SkillBars>>,
    gate: RefCell<Option<ScrollGate>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl ScrollSynchronizer {
    pub(crate) fn new(config: &InteractionConfig, nav: Rc<NavLinks>, skills: Option<Rc<SkillBars>>) -> Rc<Self> {
        let sections = dom::query_all(SECTION_SELECTOR)
            .into_iter()
            .filter_map(|section| Some((dom::attr(&section, "id")?, section)))
            .filter(|(id, _)| !id.is_empty())
            .collect();

        Rc::new(Self {
            config: config.clone(),
            sections,
            nav,
            navbar: dom::query(NAVBAR_SELECTOR),
            back_to_top: dom::query(BACK_TO_TOP_SELECTOR),
            skills_section: dom::query(SKILLS_SECTION_SELECTOR),
            skills,
            gate: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        })
    }

    pub(crate) fn init(self: &Rc<Self>) {
        let Some(win) = web_sys::window() else {
            return;
        };

        let tick = {
            let sync = Rc::downgrade(self);
            move || {
                if let Some(sync) = sync.upgrade() {
                    sync.tick();
                }
            }
        };
        let gate = match self.config.batching {
            ScrollBatching::Interval { ms } => ScrollGate::Interval(ThrottledCallback::new(ms, move |()| tick())),
            ScrollBatching::AnimationFrame => ScrollGate::Frame(FrameScheduler::new(tick)),
        };
        *self.gate.borrow_mut() = Some(gate);

        let mut listeners = self.listeners.borrow_mut();
        for event_type in ["scroll", "resize"] {
            let sync = Rc::downgrade(self);
            listeners.push(EventListener::new(&win, event_type, move |_| {
                if let Some(sync) = sync.upgrade() {
                    if let Some(gate) = sync.gate.borrow().as_ref() {
                        gate.request();
                    }
                }
            }));
        }
        drop(listeners);

        self.tick();
    }

    pub(crate) fn teardown(&self) {
        self.listeners.borrow_mut().clear();
        if let Some(gate) = self.gate.borrow_mut().take() {
            gate.cancel();
        }
    }

    fn read_layout(&self, win: &web_sys::Window) -> ScrollInput {
        let scroll_y = dom::scroll_y(win);

        ScrollInput {
            scroll_y,
            viewport_height: dom::viewport_height(win),
            sections: self
                .sections
                .iter()
                .map(|(id, section)| SectionLayout {
                    id: id.clone(),
                    extent: dom::document_extent(section, scroll_y),
                })
                .collect(),
            skills: self
                .skills_section
                .as_ref()
                .map(|section| dom::document_extent(section, scroll_y)),
        }
    }

    fn tick(&self) {
        let Some(win) = web_sys::window() else {
            return;
        };

        let input = self.read_layout(&win);
        let previous = self.nav.active();
        let state = derive_ui_state(&input, previous.as_deref(), &self.config);
        self.apply(&state);
    }

    fn apply(&self, state: &ScrollState) {
        if let Some(section_id) = state.active_section_id.as_deref() {
            if self.nav.mark_active(section_id) {
                log_event(
                    &self.config,
                    LogLevel::Debug,
                    "active_section_changed",
                    serde_json::json!({
                        "section": section_id,
                        "scroll_y": state.current_scroll_y,
                    }),
                );
            }
        }

        if let Some(navbar) = self.navbar.as_ref() {
            set_class(navbar, NAVBAR_ELEVATED_CLASS, state.navbar_elevated);
        }

        if let Some(back_to_top) = self.back_to_top.as_ref() {
            set_class(back_to_top, BACK_TO_TOP_VISIBLE_CLASS, state.back_to_top_visible);
        }

        if state.skills_in_view {
            if let Some(skills) = self.skills.as_ref() {
                skills.animate();
            }
        }
    }
}
