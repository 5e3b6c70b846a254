use std::rc::Rc;

use gloo::events::EventListener;
use web_sys::Element;

use super::dom::{self, set_class, set_style};
use crate::config::InteractionConfig;
use crate::log::{log_event, LogLevel};
use crate::projects::{visibility, Filter};

const FILTER_BUTTON_SELECTOR: &str = ".filter-btn";
const PROJECT_CARD_SELECTOR: &str = ".project-card";
const FILTER_BUTTON_ACTIVE_CLASS: &str = "active";

struct FilterTargets {
    buttons: Vec<Element>,
    cards: Vec<Element>,
}

impl FilterTargets {
    fn select(&self, selected: usize, config: &InteractionConfig) {
        let Some(button) = self.buttons.get(selected) else {
            return;
        };
        let filter = Filter::parse(dom::attr(button, "data-filter").as_deref());

        for (index, button) in self.buttons.iter().enumerate() {
            set_class(button, FILTER_BUTTON_ACTIVE_CLASS, index == selected);
        }

        let categories: Vec<Option<String>> = self
            .cards
            .iter()
            .map(|card| dom::attr(card, "data-category"))
            .collect();
        let shown = visibility(&filter, categories.iter().map(Option::as_deref));

        for (card, visible) in self.cards.iter().zip(&shown) {
            set_style(card, "display", if *visible { "" } else { "none" });
        }

        log_event(
            config,
            LogLevel::Info,
            "project_filter_applied",
            serde_json::json!({
                "filter": filter.as_str(),
                "visible": shown.iter().filter(|visible| **visible).count(),
                "total": shown.len(),
            }),
        );
    }
}

pub(crate) struct ProjectFilter {
    _listeners: Vec<EventListener>,
}

impl ProjectFilter {
    pub(crate) fn init(config: &InteractionConfig) -> Option<Self> {
        let targets = Rc::new(FilterTargets {
            buttons: dom::query_all(FILTER_BUTTON_SELECTOR),
            cards: dom::query_all(PROJECT_CARD_SELECTOR),
        });
        if targets.buttons.is_empty() || targets.cards.is_empty() {
            return None;
        }

        let listeners = targets
            .buttons
            .iter()
            .enumerate()
            .map(|(index, button)| {
                let targets = targets.clone();
                let config = config.clone();
                EventListener::new(button, "click", move |_| targets.select(index, &config))
            })
            .collect();

        Some(Self {
            _listeners: listeners,
        })
    }
}
