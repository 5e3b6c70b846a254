#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealTarget {
    pub delay_ms: u32,
    has_revealed: bool,
}

impl RevealTarget {
    pub fn has_revealed(&self) -> bool {
        self.has_revealed
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealTransition {
    pub index: usize,
    pub delay_ms: u32,
}

#[derive(Clone, Debug, Default)]
pub struct RevealBoard {
    targets: Vec<RevealTarget>,
}

impl RevealBoard {
    pub fn new(sibling_indices: impl IntoIterator<Item = usize>, stagger_ms: u32) -> Self {
        let targets = sibling_indices
            .into_iter()
            .map(|sibling| RevealTarget {
                delay_ms: stagger_delay(sibling, stagger_ms),
                has_revealed: false,
            })
            .collect();

        Self { targets }
    }

    pub fn target(&self, index: usize) -> Option<&RevealTarget> {
        self.targets.get(index)
    }

    pub fn on_visibility(&mut self, index: usize, intersecting: bool) -> Option<RevealTransition> {
        if !intersecting {
            return None;
        }

        let target = self.targets.get_mut(index)?;
        if target.has_revealed {
            return None;
        }
        target.has_revealed = true;

        Some(RevealTransition {
            index,
            delay_ms: target.delay_ms,
        })
    }

    pub fn all_revealed(&self) -> bool {
        self.targets.iter().all(RevealTarget::has_revealed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillItem {
    pub target_percent: u8,
    animated: bool,
}

impl SkillItem {
    pub fn animated(&self) -> bool {
        self.animated
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillFill {
    pub index: usize,
    pub percent: u8,
    pub delay_ms: u32,
}

#[derive(Clone, Debug, Default)]
pub struct SkillBoard {
    items: Vec<SkillItem>,
    stagger_ms: u32,
}

impl SkillBoard {
    pub fn new(levels: impl IntoIterator<Item = u8>, stagger_ms: u32) -> Self {
        let items = levels
            .into_iter()
            .map(|level| SkillItem {
                target_percent: level.min(100),
                animated: false,
            })
            .collect();

        Self { items, stagger_ms }
    }

    pub fn animate_pending(&mut self) -> Vec<SkillFill> {
        let stagger_ms = self.stagger_ms;

        self.items
            .iter_mut()
            .enumerate()
            .filter(|(_, item)| !item.animated)
            .map(|(index, item)| {
                item.animated = true;
                SkillFill {
                    index,
                    percent: item.target_percent,
                    delay_ms: stagger_delay(index, stagger_ms),
                }
            })
            .collect()
    }

    pub fn all_animated(&self) -> bool {
        self.items.iter().all(SkillItem::animated)
    }
}

pub fn parse_level(raw: Option<&str>) -> u8 {
    raw.map(|value| value.trim().trim_end_matches('%').trim())
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .map(|value| value.clamp(0.0, 100.0).round() as u8)
        .unwrap_or(0)
}

fn stagger_delay(position: usize, stagger_ms: u32) -> u32 {
    u32::try_from(position)
        .unwrap_or(u32::MAX)
        .saturating_mul(stagger_ms)
}
