//! Property tests for the scroll, throttle, filter and toast invariants.

#![cfg(not(target_arch = "wasm32"))]

use portfolio_interactions::config::InteractionConfig;
use portfolio_interactions::notification::{Severity, ToastSlot};
use portfolio_interactions::projects::{visibility, Filter};
use portfolio_interactions::reveal::{RevealBoard, SkillBoard};
use portfolio_interactions::scroll_state::{derive_ui_state, ScrollInput, SectionLayout};
use portfolio_interactions::throttle::{Submission, Throttle};
use proptest::prelude::*;

// ============================================================================
// Strategy Generators
// ============================================================================

/// Contiguous, non-overlapping sections starting at `start`.
fn section_layout_strategy() -> impl Strategy<Value = Vec<SectionLayout>> {
    (0.0..500.0f64, prop::collection::vec(50.0..2_000.0f64, 1..8)).prop_map(|(start, heights)| {
        let mut top = start;
        heights
            .into_iter()
            .enumerate()
            .map(|(index, height)| {
                let section = SectionLayout::new(format!("section-{index}"), top, height);
                top += height;
                section
            })
            .collect()
    })
}

fn category_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("cad".to_string())),
        Just(Some("fea".to_string())),
        Just(Some("robotics".to_string())),
    ]
}

fn scroll_input(scroll_y: f64, sections: Vec<SectionLayout>) -> ScrollInput {
    ScrollInput {
        scroll_y,
        viewport_height: 800.0,
        sections,
        skills: None,
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// A header-offset position inside one section's half-open range activates
    /// exactly that section.
    #[test]
    fn offset_position_inside_section_activates_it(
        sections in section_layout_strategy(),
        pick in any::<prop::sample::Index>(),
        fraction in 0.0..1.0f64,
    ) {
        let config = InteractionConfig::default();
        let target = &sections[pick.index(sections.len())];
        let scroll_y = target.extent.top + fraction * target.extent.height - config.header_offset_px;
        let position = scroll_y + config.header_offset_px;
        prop_assume!(target.extent.contains(position));

        let state = derive_ui_state(&scroll_input(scroll_y, sections.clone()), Some("elsewhere"), &config);
        prop_assert_eq!(state.active_section_id.as_deref(), Some(target.id.as_str()));

        let containing = sections.iter().filter(|section| section.extent.contains(position)).count();
        prop_assert_eq!(containing, 1);
    }

    /// Past the last section the previously active id is kept.
    #[test]
    fn no_match_is_sticky(sections in section_layout_strategy(), beyond in 0.0..5_000.0f64, previous in "[a-z]{1,12}") {
        let config = InteractionConfig::default();
        let end = sections.last().map(|section| section.extent.bottom()).unwrap_or(0.0);
        let scroll_y = end + beyond;

        let state = derive_ui_state(&scroll_input(scroll_y, sections), Some(&previous), &config);
        prop_assert_eq!(state.active_section_id, Some(previous));
    }

    /// Elevated and back-to-top flags use strict inequalities.
    #[test]
    fn thresholds_are_strict(scroll_y in 0.0..1_000.0f64) {
        let config = InteractionConfig::default();
        let state = derive_ui_state(&scroll_input(scroll_y, Vec::new()), None, &config);

        prop_assert_eq!(state.navbar_elevated, scroll_y > 50.0);
        prop_assert_eq!(state.back_to_top_visible, scroll_y > 300.0);
    }

    /// N calls inside one interval produce at most two executions, the
    /// trailing one carrying the latest arguments.
    #[test]
    fn throttle_runs_at_most_twice_per_interval(offsets in prop::collection::vec(0.0..99.0f64, 1..50)) {
        let mut throttle = Throttle::new(100.0);
        let mut offsets = offsets;
        offsets.sort_by(|a, b| a.total_cmp(b));

        let mut executions = Vec::new();
        for (index, at) in offsets.iter().enumerate() {
            if let Submission::RunNow(args) = throttle.submit(*at, index) {
                executions.push(args);
            }
        }
        if let Some(args) = throttle.fire(100.0) {
            executions.push(args);
        }

        prop_assert!(executions.len() <= 2);
        prop_assert_eq!(executions.first().copied(), Some(0));
        if offsets.len() > 1 {
            prop_assert_eq!(executions.last().copied(), Some(offsets.len() - 1));
        }
    }

    /// Filtering shows exactly the matching cards, or all of them for "all".
    #[test]
    fn filter_shows_exact_matches(
        categories in prop::collection::vec(category_strategy(), 0..20),
        selected in prop_oneof![Just("all"), Just("cad"), Just("fea"), Just("robotics")],
    ) {
        let filter = Filter::parse(Some(selected));
        let shown = visibility(&filter, categories.iter().map(Option::as_deref));

        for (category, visible) in categories.iter().zip(shown) {
            let expected = selected == "all" || category.as_deref() == Some(selected);
            prop_assert_eq!(visible, expected);
        }
    }

    /// Repeated shows leave exactly one toast carrying the last message.
    #[test]
    fn toast_slot_holds_only_latest(messages in prop::collection::vec("[a-z ]{1,30}", 1..10)) {
        let mut slot = ToastSlot::new();
        for (index, message) in messages.iter().enumerate() {
            slot.show(message.clone(), Severity::Info, index as f64);
        }

        let current = slot.current().expect("a toast is live");
        prop_assert_eq!(&current.message, messages.last().expect("non-empty"));
    }

    /// Reveal and skill animations fire once no matter how often they are triggered.
    #[test]
    fn reveals_are_one_shot(count in 1usize..20, repeats in 1usize..5) {
        let mut board = RevealBoard::new(0..count, 100);
        let mut skills = SkillBoard::new((0..count).map(|index| (index * 7 % 101) as u8), 150);

        let mut reveals = 0;
        let mut fills = 0;
        for _ in 0..repeats {
            for index in 0..count {
                reveals += usize::from(board.on_visibility(index, true).is_some());
            }
            fills += skills.animate_pending().len();
        }

        prop_assert_eq!(reveals, count);
        prop_assert_eq!(fills, count);
        prop_assert!(board.all_revealed());
        prop_assert!(skills.all_animated());
    }
}
