pub mod editor;
pub mod exam;
pub mod manage;
