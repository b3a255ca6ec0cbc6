use egui::{Context, Grid, RichText, ScrollArea};

use crate::app::ExamApp;
use crate::ui::helpers::big_button;
use crate::ui::layout::simple_panel;
use crate::view_models::QuestionRow;

pub fn ui_manage(app: &mut ExamApp, ctx: &Context) {
    simple_panel(ctx, 900.0, egui::Margin::symmetric(16, 12), |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("Manage questions");
        });
        ui.add_space(8.0);

        let rows: Vec<QuestionRow> = app.manager.rows().to_vec();
        let selected = app.manager.selected();
        let mut clicked: Option<i64> = None;

        ScrollArea::vertical()
            .max_height((ui.available_height() - 60.0).max(120.0))
            .auto_shrink([false, true])
            .show(ui, |ui| {
                if rows.is_empty() {
                    ui.label("The question database is empty.");
                    return;
                }

                Grid::new("questions_grid")
                    .striped(true)
                    .num_columns(4)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("ID").strong());
                        ui.label(RichText::new("Question").strong());
                        ui.label(RichText::new("Answer options").strong());
                        ui.label(RichText::new("Correct").strong());
                        ui.end_row();

                        for r in &rows {
                            let is_selected = selected == Some(r.id);
                            if ui.selectable_label(is_selected, r.id.to_string()).clicked() {
                                clicked = Some(r.id);
                            }
                            if ui.selectable_label(is_selected, r.prompt.as_str()).clicked() {
                                clicked = Some(r.id);
                            }
                            ui.label(r.options_text.as_str());
                            let correct = ui.label(r.correct_label());
                            if let Some(flag) = &r.flag {
                                correct.on_hover_text(flag.as_str());
                            }
                            ui.end_row();
                        }
                    });
            });

        if let Some(id) = clicked {
            app.manager.select(id);
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if big_button(ui, "Edit", 120.0, 32.0, true) {
                app.edit_selected();
            }
            if big_button(ui, "Delete", 120.0, 32.0, true) {
                app.request_delete_selected();
            }
            if big_button(ui, "Refresh", 120.0, 32.0, true) {
                app.refresh_list();
            }
        });
    });
}
