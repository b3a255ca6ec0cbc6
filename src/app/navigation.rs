use super::*;

impl ExamApp {
    pub fn open_tab(&mut self, tab: Tab) {
        if self.prefs.tab == tab {
            return;
        }
        log::debug!("switching to {}", tab.title());
        self.prefs.tab = tab;
    }

    /// Leaves edit mode and goes back to an empty form.
    pub fn cancel_edit(&mut self) {
        self.editor.cancel_edit();
    }

    pub fn set_dark_mode(&mut self, dark: bool) {
        self.prefs.dark_mode = dark;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_switch_is_remembered_in_prefs() {
        let mut app = ExamApp::new(QuestionStore::open_in_memory().unwrap());
        assert_eq!(app.tab(), Tab::AddQuestion);
        app.open_tab(Tab::Manage);
        assert_eq!(app.prefs.tab, Tab::Manage);
    }
}
