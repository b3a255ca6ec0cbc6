use std::path::Path;

use eframe::egui;
use exam_quiz::ExamApp;
use exam_quiz::config::{AppConfig, CONFIG_FILE};
use exam_quiz::model::UiPrefs;
use exam_quiz::store::QuestionStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var_os("RUST_LOG").is_none() {
        pretty_env_logger::formatted_builder()
            .filter_level(log::LevelFilter::Info)
            .init();
    } else {
        pretty_env_logger::init();
    }

    let config = AppConfig::load_or_default(Path::new(CONFIG_FILE));
    let store = QuestionStore::open(&config.database_path)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title.clone())
            .with_inner_size([config.window_width, config.window_height]),
        ..Default::default()
    };

    eframe::run_native(
        &config.window_title,
        options,
        Box::new(|cc| {
            let prefs: UiPrefs = cc
                .storage
                .and_then(|s| eframe::get_value(s, eframe::APP_KEY))
                .unwrap_or_default();
            cc.egui_ctx.set_visuals(if prefs.dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            Ok(Box::new(ExamApp::new(store).with_prefs(prefs)))
        }),
    )?;
    Ok(())
}
