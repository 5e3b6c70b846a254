mod contact_form;
mod dom;
mod navigation;
mod notifications;
mod projects;
mod reveal;
mod schedule;
mod scroll_sync;

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::window;
use yew::AppHandle;

use crate::config::InteractionConfig;
use crate::log::{log_event, LogLevel};

use contact_form::ContactFormHandler;
use navigation::{NavLinks, NavigationController};
use notifications::{NotificationHost, NotificationHostProps, Notifier, HOST_ELEMENT_ID};
use projects::ProjectFilter;
use reveal::{RevealObserver, SkillBars, SkillsObserver};
use scroll_sync::ScrollSynchronizer;

thread_local! {
    static ACTIVE: RefCell<Option<Interactions>> = const { RefCell::new(None) };
}

struct Interactions {
    config: InteractionConfig,
    notifier: Notifier,
    host: Option<AppHandle<NotificationHost>>,
    scroll: Option<Rc<ScrollSynchronizer>>,
    reveal: Option<RevealObserver>,
    skills: Option<Rc<SkillBars>>,
    skills_observer: Option<SkillsObserver>,
    navigation: Option<NavigationController>,
    projects: Option<ProjectFilter>,
    contact: Option<ContactFormHandler>,
}

fn report<T>(config: &InteractionConfig, component: &str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        log_event(
            config,
            LogLevel::Debug,
            "component_skipped",
            serde_json::json!({ "component": component }),
        );
    }
    value
}

fn mount_notification_host(notifier: &Notifier) -> Option<AppHandle<NotificationHost>> {
    let document = window()?.document()?;
    let host = match document.get_element_by_id(HOST_ELEMENT_ID) {
        Some(host) => host,
        None => {
            let host = document.create_element("div").ok()?;
            host.set_id(HOST_ELEMENT_ID);
            document.body()?.append_child(&host).ok()?;
            host
        }
    };

    let props = NotificationHostProps {
        notifier: notifier.clone(),
    };
    Some(yew::Renderer::<NotificationHost>::with_root_and_props(host, props).render())
}

impl Interactions {
    fn init(config: InteractionConfig) -> Self {
        let reduced_motion = dom::prefers_reduced_motion();
        let notifier = Notifier::new(config.toast_duration_ms);
        let host = report(&config, "notification_host", mount_notification_host(&notifier));

        let nav = NavLinks::collect();
        let skills = report(&config, "skill_bars", SkillBars::init(&config, reduced_motion));
        let skills_observer = skills.clone().and_then(|skills| {
            report(&config, "skills_observer", SkillsObserver::init(&config, skills))
        });

        let scroll = ScrollSynchronizer::new(&config, nav.clone(), skills.clone());
        scroll.init();

        let reveal = report(&config, "reveal_observer", RevealObserver::init(&config, reduced_motion));
        let navigation = report(&config, "navigation", NavigationController::init(&config, nav));
        let projects = report(&config, "project_filter", ProjectFilter::init(&config));
        let contact = report(&config, "contact_form", ContactFormHandler::init(&config, notifier.clone()));

        log_event(
            &config,
            LogLevel::Info,
            "interactions_init",
            serde_json::json!({
                "reduced_motion": reduced_motion,
                "reveal": reveal.is_some(),
                "skills": skills.is_some(),
                "navigation": navigation.is_some(),
                "projects": projects.is_some(),
                "contact": contact.is_some(),
            }),
        );

        Self {
            config,
            notifier,
            host,
            scroll: Some(scroll),
            reveal,
            skills,
            skills_observer,
            navigation,
            projects,
            contact,
        }
    }

    fn teardown(self) {
        if let Some(scroll) = self.scroll.as_ref() {
            scroll.teardown();
        }
        if let Some(reveal) = self.reveal.as_ref() {
            reveal.teardown();
        }
        if let Some(observer) = self.skills_observer.as_ref() {
            observer.teardown();
        }
        if let Some(skills) = self.skills.as_ref() {
            skills.teardown();
        }
        if let Some(navigation) = self.navigation.as_ref() {
            navigation.teardown();
        }
        self.notifier.teardown();
        if let Some(host) = self.host {
            host.destroy();
        }

        log_event(&self.config, LogLevel::Info, "teardown", serde_json::json!({}));
        // Remaining listeners are released as the handles drop.
        drop(self.projects);
        drop(self.contact);
    }
}

pub fn run() {
    let (config, config_error) = InteractionConfig::from_json_or_default(dom::config_source().as_deref());
    if let Some(error) = config_error {
        log_event(
            &config,
            LogLevel::Warn,
            "config_invalid",
            serde_json::json!({ "message": error.to_string() }),
        );
    }

    let interactions = Interactions::init(config);
    if let Some(previous) = ACTIVE.with(|slot| slot.replace(Some(interactions))) {
        previous.teardown();
    }
}

/// Removes every listener, observer and timer installed by [`run`].
pub fn teardown() {
    if let Some(interactions) = ACTIVE.with(|slot| slot.take()) {
        interactions.teardown();
    }
}
