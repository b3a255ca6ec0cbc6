use log::info;

use crate::error::QuizError;
use crate::store::QuestionStore;
use crate::view_models::QuestionRow;

/// Backing state of the question list: cached rows, the selected row and a
/// delete waiting for confirmation.
#[derive(Debug, Default)]
pub struct QuestionManager {
    rows: Vec<QuestionRow>,
    selected: Option<i64>,
    pending_delete: Option<i64>,
}

impl QuestionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reloads the rows. The previous rows are kept if the read fails.
    pub fn refresh(&mut self, store: &QuestionStore) -> Result<usize, QuizError> {
        let questions = store.list_all()?;
        self.rows = questions.iter().map(QuestionRow::from_question).collect();
        if let Some(id) = self.selected {
            if !self.rows.iter().any(|r| r.id == id) {
                self.selected = None;
            }
        }
        Ok(self.rows.len())
    }

    pub fn rows(&self) -> &[QuestionRow] {
        &self.rows
    }

    pub fn select(&mut self, id: i64) {
        self.selected = Some(id);
    }

    pub fn selected(&self) -> Option<i64> {
        self.selected
    }

    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the row awaiting confirmation and drops it from the cached rows.
    ///
    /// Returns `Ok(None)` when nothing was pending. On error the request is
    /// dropped and the rows stay as they were. The list is not reloaded here,
    /// so a successful delete is never reported as a failure.
    pub fn confirm_delete(&mut self, store: &QuestionStore) -> Result<Option<i64>, QuizError> {
        let Some(id) = self.pending_delete.take() else {
            return Ok(None);
        };
        store.delete(id)?;
        self.rows.retain(|r| r.id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        info!("question {id} removed from the list");
        Ok(Some(id))
    }
}
