pub const FILTER_ALL: &str = "all";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    All,
    Category(String),
}

impl Filter {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            None | Some(FILTER_ALL) => Self::All,
            Some(category) => Self::Category(category.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => FILTER_ALL,
            Self::Category(category) => category,
        }
    }

    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Category(wanted) => category.map(str::trim) == Some(wanted.as_str()),
        }
    }
}

pub fn visibility<'a>(filter: &Filter, categories: impl IntoIterator<Item = Option<&'a str>>) -> Vec<bool> {
    categories
        .into_iter()
        .map(|category| filter.matches(category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_shows_every_card() {
        let shown = visibility(&Filter::All, [Some("cad"), None, Some("fea")]);
        assert_eq!(shown, vec![true, true, true]);
    }

    #[test]
    fn category_shows_only_exact_matches() {
        let filter = Filter::parse(Some("cad"));
        let shown = visibility(&filter, [Some("cad"), Some("CAD"), None, Some(" cad ")]);
        assert_eq!(shown, vec![true, false, false, true]);
    }

    #[test]
    fn blank_filter_means_all() {
        assert_eq!(Filter::parse(None), Filter::All);
        assert_eq!(Filter::parse(Some("  ")), Filter::All);
        assert_eq!(Filter::parse(Some("all")), Filter::All);
        assert_eq!(Filter::parse(Some("robotics")).as_str(), "robotics");
    }
}
