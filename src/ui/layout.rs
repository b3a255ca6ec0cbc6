use egui::{Align2, CentralPanel, Color32, Context, Frame, RichText, Ui, Visuals};

use crate::app::{ExamApp, NoticeKind};
use crate::model::Tab;

pub fn top_panel(app: &mut ExamApp, ctx: &Context) {
    egui::TopBottomPanel::top("tab_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            for tab in Tab::ALL {
                if ui.selectable_label(app.tab() == tab, tab.title()).clicked() {
                    app.open_tab(tab);
                }
            }
        });
    });
}

pub fn bottom_panel(app: &mut ExamApp, ctx: &Context) {
    egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("🌙 Dark mode").clicked() {
                ctx.set_visuals(Visuals::dark());
                app.set_dark_mode(true);
            }
            if ui.button("☀ Light mode").clicked() {
                ctx.set_visuals(Visuals::light());
                app.set_dark_mode(false);
            }
            let total = app.manager.rows().len();
            ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
                ui.label(format!("{total} questions in the database"));
            });
        });
    });
}

/// Central panel with a width cap, used by every tab.
pub fn simple_panel(
    ctx: &Context,
    max_width: f32,
    margin: egui::Margin,
    inner: impl FnOnce(&mut Ui),
) {
    CentralPanel::default().show(ctx, |ui| {
        let w = ui.available_width().min(max_width);
        Frame::default()
            .fill(ui.visuals().window_fill())
            .inner_margin(margin)
            .show(ui, |ui| {
                ui.set_width(w);
                inner(ui);
            });
    });
}

pub fn notice_window(app: &mut ExamApp, ctx: &Context) {
    let Some(notice) = app.notice.clone() else {
        return;
    };
    let colour = match notice.kind {
        NoticeKind::Info => ctx.style().visuals.text_color(),
        NoticeKind::Success => Color32::from_rgb(60, 170, 90),
        NoticeKind::Error => Color32::from_rgb(210, 70, 60),
    };

    egui::Window::new(notice.title.as_str())
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(RichText::new(&notice.body).color(colour));
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    app.dismiss_notice();
                }
            });
        });
}

pub fn confirm_delete_window(app: &mut ExamApp, ctx: &Context) {
    egui::Window::new("Confirm deletion")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label("Are you sure you want to delete this question?");
            ui.horizontal(|ui| {
                if ui.button("Yes, delete").clicked() {
                    app.delete_confirmed();
                }
                if ui.button("No").clicked() {
                    app.delete_cancelled();
                }
            });
        });
}
