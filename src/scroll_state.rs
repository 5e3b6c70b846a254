use crate::config::InteractionConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub top: f64,
    pub height: f64,
}

impl Extent {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Half-open containment: `top <= position < bottom`.
    pub fn contains(&self, position: f64) -> bool {
        self.top <= position && position < self.bottom()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionLayout {
    pub id: String,
    pub extent: Extent,
}

impl SectionLayout {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            extent: Extent::new(top, height),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollInput {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub sections: Vec<SectionLayout>,
    pub skills: Option<Extent>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollState {
    pub current_scroll_y: f64,
    pub active_section_id: Option<String>,
    pub navbar_elevated: bool,
    pub back_to_top_visible: bool,
    pub skills_in_view: bool,
}

pub fn active_section<'a>(sections: &'a [SectionLayout], probe: f64) -> Option<&'a SectionLayout> {
    sections.iter().find(|section| section.extent.contains(probe))
}

pub fn skills_in_view(scroll_y: f64, viewport_height: f64, skills: Extent) -> bool {
    scroll_y + viewport_height >= skills.top && scroll_y <= skills.bottom()
}

/// When no section contains the probe position the previously active id is
/// carried over unchanged rather than cleared.
pub fn derive_ui_state(
    input: &ScrollInput,
    previous_active: Option<&str>,
    config: &InteractionConfig,
) -> ScrollState {
    let probe = input.scroll_y + config.header_offset_px;
    let active_section_id = active_section(&input.sections, probe)
        .map(|section| section.id.clone())
        .or_else(|| previous_active.map(ToString::to_string));

    ScrollState {
        current_scroll_y: input.scroll_y,
        active_section_id,
        navbar_elevated: input.scroll_y > config.scroll_thresholds.elevate,
        back_to_top_visible: input.scroll_y > config.scroll_thresholds.back_to_top,
        skills_in_view: input
            .skills
            .is_some_and(|skills| skills_in_view(input.scroll_y, input.viewport_height, skills)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Vec<SectionLayout> {
        vec![
            SectionLayout::new("home", 0.0, 600.0),
            SectionLayout::new("about", 600.0, 800.0),
            SectionLayout::new("projects", 1400.0, 1000.0),
        ]
    }

    fn input(scroll_y: f64) -> ScrollInput {
        ScrollInput {
            scroll_y,
            viewport_height: 800.0,
            sections: layout(),
            skills: Some(Extent::new(3000.0, 500.0)),
        }
    }

    #[test]
    fn probe_includes_header_offset() {
        let config = InteractionConfig::default();
        // 460 + 150 = 610 lands in "about".
        let state = derive_ui_state(&input(460.0), None, &config);
        assert_eq!(state.active_section_id.as_deref(), Some("about"));
    }

    #[test]
    fn section_bottom_is_exclusive() {
        let config = InteractionConfig::default();
        let state = derive_ui_state(&input(600.0 - config.header_offset_px), None, &config);
        assert_eq!(state.active_section_id.as_deref(), Some("about"));
    }

    #[test]
    fn first_matching_section_wins_on_overlap() {
        let config = InteractionConfig::default();
        let overlapping = ScrollInput {
            sections: vec![
                SectionLayout::new("first", 0.0, 1000.0),
                SectionLayout::new("second", 500.0, 1000.0),
            ],
            ..input(600.0)
        };
        let state = derive_ui_state(&overlapping, None, &config);
        assert_eq!(state.active_section_id.as_deref(), Some("first"));
    }

    #[test]
    fn no_match_keeps_previous_active() {
        let config = InteractionConfig::default();
        let state = derive_ui_state(&input(5000.0), Some("projects"), &config);
        assert_eq!(state.active_section_id.as_deref(), Some("projects"));

        let state = derive_ui_state(&input(5000.0), None, &config);
        assert_eq!(state.active_section_id, None);
    }

    #[test]
    fn thresholds_are_strict() {
        let config = InteractionConfig::default();

        let at_elevate = derive_ui_state(&input(50.0), None, &config);
        assert!(!at_elevate.navbar_elevated);
        assert!(derive_ui_state(&input(50.5), None, &config).navbar_elevated);

        let at_back_to_top = derive_ui_state(&input(300.0), None, &config);
        assert!(!at_back_to_top.back_to_top_visible);
        assert!(derive_ui_state(&input(301.0), None, &config).back_to_top_visible);
    }

    #[test]
    fn skills_visibility_uses_viewport_overlap() {
        let skills = Extent::new(3000.0, 500.0);
        assert!(!skills_in_view(2100.0, 800.0, skills));
        assert!(skills_in_view(2200.0, 800.0, skills));
        assert!(skills_in_view(3500.0, 800.0, skills));
        assert!(!skills_in_view(3501.0, 800.0, skills));
    }

    #[test]
    fn missing_skills_section_is_never_in_view() {
        let config = InteractionConfig::default();
        let state = derive_ui_state(
            &ScrollInput {
                skills: None,
                ..input(3000.0)
            },
            None,
            &config,
        );
        assert!(!state.skills_in_view);
    }
}
