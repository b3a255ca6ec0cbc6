use egui::{Context, ScrollArea, TextEdit};

use crate::app::ExamApp;
use crate::ui::helpers::{big_button, two_button_row};
use crate::ui::layout::simple_panel;

pub fn ui_editor(app: &mut ExamApp, ctx: &Context) {
    simple_panel(ctx, 760.0, egui::Margin::symmetric(16, 12), |ui| {
        let panel_width = ui.available_width();

        match app.editor.editing_id() {
            Some(id) => ui.heading(format!("Edit question #{id}")),
            None => ui.heading("New question"),
        };
        ui.add_space(8.0);

        ui.label("Question:");
        ui.add(
            TextEdit::multiline(app.editor.prompt_mut())
                .desired_width(panel_width)
                .desired_rows(3),
        );
        ui.add_space(8.0);

        ui.label("Answer options (tick the correct ones):");
        ScrollArea::vertical()
            .max_height(320.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for (i, option) in app.editor.options_mut().iter_mut().enumerate() {
                    ui.horizontal(|ui| {
                        ui.checkbox(&mut option.correct, "");
                        ui.label(format!("Option {}:", i + 1));
                        ui.add(
                            TextEdit::multiline(&mut option.text)
                                .desired_width(ui.available_width())
                                .desired_rows(1),
                        );
                    });
                }
            });
        ui.add_space(6.0);

        let (add, remove) = two_button_row(ui, panel_width, "Add option", "Remove option");
        if add {
            app.add_option();
        }
        if remove {
            app.remove_option();
        }

        ui.add_space(12.0);
        ui.vertical_centered(|ui| {
            let save_label = if app.editor.is_editing() {
                "Update question"
            } else {
                "Add question"
            };
            if big_button(ui, save_label, 220.0, 36.0, true) {
                app.save_question();
            }
            if app.editor.is_editing() && ui.button("Cancel editing").clicked() {
                app.cancel_edit();
            }
        });
    });
}
