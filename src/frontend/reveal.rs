use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::dom::{self, set_style};
use crate::config::InteractionConfig;
use crate::log::{log_event, LogLevel};
use crate::reveal::{parse_level, RevealBoard, SkillBoard};

pub(crate) const REVEAL_SELECTOR: &str = ".project-card, .timeline-item, .education-card";
pub(crate) const SKILLS_SECTION_SELECTOR: &str = ".skills, #skills";
pub(crate) const SKILL_BAR_SELECTOR: &str = ".skill-progress";

const HIDDEN_TRANSFORM: &str = "translateY(30px)";
const REVEALED_TRANSFORM: &str = "translateY(0)";
const SKILL_TRANSITION: &str = "width 1.5s ease-out";

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

fn build_observer(threshold: f64, callback: &ObserverCallback) -> Option<IntersectionObserver> {
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options).ok()
}

fn intersecting_targets(entries: &Array) -> Vec<Element> {
    entries
        .iter()
        .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
        .filter(IntersectionObserverEntry::is_intersecting)
        .map(|entry| entry.target())
        .collect()
}

/// Position of each element among the tracked elements sharing its parent.
fn sibling_positions(elements: &[Element]) -> Vec<usize> {
    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            let parent = element.parent_element();
            elements[..index]
                .iter()
                .filter(|earlier| earlier.parent_element() == parent)
                .count()
        })
        .collect()
}

pub(crate) struct RevealObserver {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl RevealObserver {
    pub(crate) fn init(config: &InteractionConfig, reduced_motion: bool) -> Option<Self> {
        let targets = dom::query_all(REVEAL_SELECTOR);
        if targets.is_empty() {
            return None;
        }

        let stagger_ms = if reduced_motion { 0 } else { config.stagger_ms };
        let board = RevealBoard::new(sibling_positions(&targets), stagger_ms);

        for (index, target) in targets.iter().enumerate() {
            let delay_s = board
                .target(index)
                .map(|target| f64::from(target.delay_ms) / 1_000.0)
                .unwrap_or(0.0);
            set_style(target, "opacity", "0");
            set_style(target, "transform", HIDDEN_TRANSFORM);
            set_style(
                target,
                "transition",
                &format!("opacity 0.6s ease {delay_s}s, transform 0.6s ease {delay_s}s"),
            );
        }

        let board = Rc::new(RefCell::new(board));
        let log_config = config.clone();
        let tracked = targets.clone();
        let callback: ObserverCallback = Closure::new(move |entries: Array, observer: IntersectionObserver| {
            for element in intersecting_targets(&entries) {
                let Some(index) = tracked.iter().position(|target| *target == element) else {
                    continue;
                };
                let Some(transition) = board.borrow_mut().on_visibility(index, true) else {
                    continue;
                };

                set_style(&element, "opacity", "1");
                set_style(&element, "transform", REVEALED_TRANSFORM);
                observer.unobserve(&element);
                log_event(
                    &log_config,
                    LogLevel::Debug,
                    "reveal_triggered",
                    serde_json::json!({
                        "index": transition.index,
                        "delay_ms": transition.delay_ms,
                    }),
                );
            }
        });

        let observer = build_observer(config.reveal_threshold, &callback)?;
        for target in &targets {
            observer.observe(target);
        }

        Some(Self {
            observer,
            _callback: callback,
        })
    }

    pub(crate) fn teardown(&self) {
        self.observer.disconnect();
    }
}

pub(crate) struct SkillBars {
    config: InteractionConfig,
    bars: Vec<Element>,
    board: RefCell<SkillBoard>,
    timers: RefCell<Vec<Timeout>>,
}

impl SkillBars {
    pub(crate) fn init(config: &InteractionConfig, reduced_motion: bool) -> Option<Rc<Self>> {
        let bars = dom::query_all(SKILL_BAR_SELECTOR);
        if bars.is_empty() {
            return None;
        }

        let levels = bars
            .iter()
            .map(|bar| parse_level(dom::attr(bar, "data-level").as_deref()));
        let stagger_ms = if reduced_motion { 0 } else { config.skill_stagger_ms };
        let board = SkillBoard::new(levels, stagger_ms);

        Some(Rc::new(Self {
            config: config.clone(),
            bars,
            board: RefCell::new(board),
            timers: RefCell::new(Vec::new()),
        }))
    }

    pub(crate) fn animate(&self) {
        let fills = self.board.borrow_mut().animate_pending();
        if fills.is_empty() {
            return;
        }

        log_event(
            &self.config,
            LogLevel::Info,
            "skills_animated",
            serde_json::json!({ "bars": fills.len() }),
        );

        let mut timers = self.timers.borrow_mut();
        for fill in fills {
            let Some(bar) = self.bars.get(fill.index).cloned() else {
                continue;
            };
            timers.push(Timeout::new(fill.delay_ms, move || {
                set_style(&bar, "width", &format!("{}%", fill.percent));
                set_style(&bar, "transition", SKILL_TRANSITION);
            }));
        }
    }

    pub(crate) fn all_animated(&self) -> bool {
        self.board.borrow().all_animated()
    }

    pub(crate) fn teardown(&self) {
        self.timers.borrow_mut().clear();
    }
}

pub(crate) struct SkillsObserver {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl SkillsObserver {
    pub(crate) fn init(config: &InteractionConfig, skills: Rc<SkillBars>) -> Option<Self> {
        let section = dom::query(SKILLS_SECTION_SELECTOR)?;

        let callback: ObserverCallback = Closure::new(move |entries: Array, observer: IntersectionObserver| {
            if intersecting_targets(&entries).is_empty() {
                return;
            }
            skills.animate();
            if skills.all_animated() {
                observer.disconnect();
            }
        });

        let observer = build_observer(config.skill_threshold, &callback)?;
        observer.observe(&section);

        Some(Self {
            observer,
            _callback: callback,
        })
    }

    pub(crate) fn teardown(&self) {
        self.observer.disconnect();
    }
}
