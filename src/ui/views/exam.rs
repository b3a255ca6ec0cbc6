use egui::{Align, Context, RichText, ScrollArea};

use crate::app::ExamApp;
use crate::ui::helpers::big_button;
use crate::ui::layout::simple_panel;

pub fn ui_exam(app: &mut ExamApp, ctx: &Context) {
    simple_panel(ctx, 760.0, egui::Margin::symmetric(16, 12), |ui| {
        let (asked, total) = app.exam.progress();

        if app.exam.current().is_none() {
            // ----------- SESSION COMPLETE -----------
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                if total == 0 {
                    ui.heading("There are no questions yet.");
                    ui.label("Add some on the \"Add Question\" tab.");
                } else {
                    ui.heading("You have answered every available question!");
                    ui.add_space(8.0);
                    ui.label(app.exam.tally().label());
                    ui.add_space(8.0);
                    ui.label("Press \"Start new session\" to begin again.");
                }
                ui.add_space(16.0);
                if big_button(ui, "Start new session", 240.0, 36.0, total > 0) {
                    app.new_session();
                }
            });
            return;
        }

        // ----------- QUESTION -----------
        let Some(current) = app.exam.current() else {
            return;
        };
        let prompt = current.question.prompt.clone();
        let options: Vec<String> = current.displayed.iter().map(|o| o.text.clone()).collect();

        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("Question {asked} of {total}")).weak());
            ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                ui.label(RichText::new(app.exam.tally().label()).weak());
            });
        });
        ui.add_space(6.0);

        ScrollArea::vertical()
            .id_salt("exam_prompt")
            .max_height(180.0)
            .show(ui, |ui| {
                ui.label(RichText::new(prompt).size(18.0));
            });
        ui.add_space(10.0);

        ui.label("Select all correct answers:");
        ScrollArea::vertical()
            .id_salt("exam_options")
            .max_height(300.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for (checked, text) in app.exam_selection.iter_mut().zip(&options) {
                    ui.checkbox(checked, text.as_str());
                    ui.add_space(4.0);
                }
            });

        ui.add_space(12.0);
        ui.vertical_centered(|ui| {
            if big_button(ui, "Check", 200.0, 36.0, true) {
                app.submit_answer();
            }
            if ui.button("Restart session").clicked() {
                app.new_session();
            }
        });
    });
}
