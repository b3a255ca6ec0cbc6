pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod exam;
pub mod manager;
pub mod model;
pub mod store;
pub mod ui;
pub mod view_models;

pub use app::ExamApp;
pub use error::{QuizError, ValidationError};
