mod helpers;
pub mod layout;
pub mod views;

use crate::app::ExamApp;
use crate::model::Tab;
use eframe::{APP_KEY, App, Frame, set_value};
use egui::Context;
use layout::{bottom_panel, confirm_delete_window, notice_window, top_panel};

impl App for ExamApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        // TAB BAR
        top_panel(self, ctx);

        // DARK / LIGHT THEME
        bottom_panel(self, ctx);

        match self.tab() {
            Tab::AddQuestion => views::editor::ui_editor(self, ctx),
            Tab::Exam => views::exam::ui_exam(self, ctx),
            Tab::Manage => views::manage::ui_manage(self, ctx),
        }

        if self.manager.pending_delete().is_some() {
            confirm_delete_window(self, ctx);
        }
        if self.notice.is_some() {
            notice_window(self, ctx);
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        set_value(storage, APP_KEY, &self.prefs);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.shutdown();
    }
}
