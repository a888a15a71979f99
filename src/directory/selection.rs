use super::*;

impl GroupDirectory {
    /// Toggles `member` according to the select mode and returns the new
    /// selection. Members without a selection key are ignored.
    pub fn toggle_select(&mut self, member: &GroupMember) -> Option<Selection> {
        let key = member.selection_key();
        if key.is_empty() {
            return None;
        }
        match self.mode {
            SelectMode::Single => {
                self.selected.clear();
                self.selected.insert(key.to_string());
            }
            SelectMode::Multi => {
                if !self.selected.remove(key) {
                    self.selected.insert(key.to_string());
                }
            }
        }
        Some(self.current_selection())
    }

    /// Resolves the selected keys against the loaded list.
    pub fn current_selection(&self) -> Selection {
        match self.mode {
            SelectMode::Multi => Selection::Multi(
                self.members
                    .iter()
                    .filter(|m| {
                        let key = m.selection_key();
                        !key.is_empty() && self.selected.contains(key)
                    })
                    .cloned()
                    .collect(),
            ),
            SelectMode::Single => Selection::Single(
                self.selected
                    .iter()
                    .next()
                    .and_then(|key| self.members.iter().find(|m| m.selection_key() == key))
                    .cloned(),
            ),
        }
    }

    pub fn is_selected(&self, member: &GroupMember) -> bool {
        let key = member.selection_key();
        !key.is_empty() && self.selected.contains(key)
    }

    pub fn selected_keys(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    /// Drops keys that are not in the loaded list.
    pub(super) fn reconcile_selection(&mut self) {
        let members = &self.members;
        self.selected
            .retain(|key| members.iter().any(|m| m.selection_key() == key));
    }

    pub fn set_filter(&mut self, text: &str) {
        self.filter = text.to_string();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Members to render: the loaded list narrowed by the text filter.
    pub fn visible(&self) -> Vec<&GroupMember> {
        self.members
            .iter()
            .filter(|m| matches_filter(m, &self.filter))
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/directory/selection_tests.rs"]
mod tests;
