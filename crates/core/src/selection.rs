//! Multi-select over a fixed option list
//!
//! Backs interest filters, tag fields and single-choice prompt pickers.
//! Tags compare case-insensitively; the spelling first selected is kept.

use kindred_domain::same_tag;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionModel {
    options: Vec<String>,
    selected: Vec<String>,
}

impl SelectionModel {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { options: options.into_iter().map(Into::into).collect(), selected: Vec::new() }
    }

    /// Model over a static option list, e.g. `SOCIAL_INTERESTS`.
    pub fn from_static(options: &[&str]) -> Self {
        Self::new(options.iter().copied())
    }

    /// Start with `selected` already chosen, in the given order.
    pub fn with_selected<I, S>(mut self, selected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected.clear();
        for tag in selected {
            let tag = tag.into();
            if !self.is_selected(&tag) {
                self.selected.push(tag);
            }
        }
        self
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Selected tags in selection order.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, tag: &str) -> bool {
        self.selected.iter().any(|s| same_tag(s, tag))
    }

    /// Flip `tag`; returns whether it is selected afterwards.
    pub fn toggle(&mut self, tag: &str) -> bool {
        if let Some(index) = self.selected.iter().position(|s| same_tag(s, tag)) {
            self.selected.remove(index);
            false
        } else {
            self.selected.push(tag.to_string());
            true
        }
    }

    /// Replace the selection with exactly `tag`.
    pub fn select_only(&mut self, tag: &str) {
        self.selected.clear();
        self.selected.push(tag.to_string());
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn into_selected(self) -> Vec<String> {
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use kindred_domain::constants::ALL_INTERESTS;

    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut model = SelectionModel::from_static(ALL_INTERESTS);
        assert!(model.toggle("Tech"));
        assert!(model.is_selected("tech"));
        assert!(!model.toggle("TECH"));
        assert!(model.is_empty());
    }

    #[test]
    fn with_selected_deduplicates_case_insensitively() {
        let model = SelectionModel::new(["Art", "Music"]).with_selected(["Art", "art", "Music"]);
        assert_eq!(model.selected(), ["Art", "Music"]);
    }

    #[test]
    fn non_ascii_tags_fold_like_the_deck_filter() {
        let mut model = SelectionModel::new(["Café", "Ürün"]).with_selected(["CAFÉ"]);
        assert!(model.is_selected("café"));
        assert!(!model.toggle("café"));
        assert!(model.toggle("ÜRÜN"));
        assert_eq!(model.selected(), ["ÜRÜN"]);
    }

    #[test]
    fn select_only_replaces_selection() {
        let mut model = SelectionModel::new(["What I love most", "My simple pleasures"])
            .with_selected(["What I love most"]);
        model.select_only("My simple pleasures");
        assert_eq!(model.selected(), ["My simple pleasures"]);
        model.clear();
        assert!(model.selected().is_empty());
    }
}
