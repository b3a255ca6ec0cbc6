use super::*;
use crate::editor::SaveOutcome;
use crate::error::QuizError;
use crate::exam::Verdict;
use std::collections::BTreeSet;

impl ExamApp {
    // ----------- EDITOR -----------

    pub fn add_option(&mut self) {
        if let Err(e) = self.editor.add_option() {
            self.notice = Some(Notice::info("Information", e.to_string()));
        }
    }

    pub fn remove_option(&mut self) {
        if let Err(e) = self.editor.remove_option() {
            self.notice = Some(Notice::info("Information", e.to_string()));
        }
    }

    pub fn save_question(&mut self) {
        match self.editor.save(&self.ctx.store) {
            Ok(outcome) => {
                let body = match outcome {
                    SaveOutcome::Created(_) => "Question added!",
                    SaveOutcome::Updated(_) => "Question updated!",
                };
                self.notice = Some(Notice::success("Success", body));
                self.after_mutation();
            }
            Err(e) => self.report("Error", e),
        }
    }

    // ----------- EXAM -----------

    /// Keeps one checkbox per displayed option, all cleared.
    pub fn sync_exam_selection(&mut self) {
        let len = self.exam.current().map_or(0, |c| c.displayed.len());
        self.exam_selection = vec![false; len];
    }

    pub fn submit_answer(&mut self) {
        let selected: BTreeSet<usize> = self
            .exam_selection
            .iter()
            .enumerate()
            .filter(|(_, checked)| **checked)
            .map(|(pos, _)| pos)
            .collect();

        match self.exam.submit(&selected) {
            Ok(Verdict::Correct) => {
                self.notice = Some(Notice::success("Result", "Correct! All answers are right."));
            }
            Ok(Verdict::Incorrect { correct_texts }) => {
                let list = correct_texts
                    .iter()
                    .map(|t| format!("- {t}"))
                    .collect::<Vec<_>>()
                    .join("\n");
                self.notice = Some(Notice::error(
                    "Result",
                    format!("Wrong!\n\nCorrect answers:\n{list}"),
                ));
            }
            Err(e) => {
                // nothing checked: stay on the same question
                self.report("Error", e);
                return;
            }
        }
        self.exam.next();
        self.sync_exam_selection();
    }

    pub fn new_session(&mut self) {
        self.exam.start_new_session();
        self.sync_exam_selection();
    }

    // ----------- MANAGE -----------

    pub fn edit_question(&mut self, id: i64) {
        match self.editor.start_edit(&self.ctx.store, id) {
            Ok(()) => self.open_tab(Tab::AddQuestion),
            Err(e) => self.report("Error", e),
        }
    }

    pub fn edit_selected(&mut self) {
        match self.manager.selected() {
            Some(id) => self.edit_question(id),
            None => {
                self.notice = Some(Notice::info("Attention", "Select a question to edit!"));
            }
        }
    }

    pub fn request_delete_selected(&mut self) {
        match self.manager.selected() {
            Some(id) => self.manager.request_delete(id),
            None => {
                self.notice = Some(Notice::info("Attention", "Select a question to delete!"));
            }
        }
    }

    pub fn delete_confirmed(&mut self) {
        match self.manager.confirm_delete(&self.ctx.store) {
            Ok(Some(id)) => {
                if self.editor.editing_id() == Some(id) {
                    self.editor.start_new();
                }
                self.notice = Some(Notice::success("Success", "Question deleted!"));
                self.after_mutation();
            }
            Ok(None) => {}
            Err(e) => self.report("Delete failed", e),
        }
    }

    pub fn delete_cancelled(&mut self) {
        self.manager.cancel_delete();
    }

    pub fn refresh_list(&mut self) {
        match self.manager.refresh(&self.ctx.store) {
            Ok(_) => {
                self.notice = Some(Notice::info("Information", "Question list refreshed!"));
            }
            Err(e) => self.report("Error", e),
        }
    }

    // ----------- SHARED -----------

    /// Called after every successful write so the other panels see it.
    fn after_mutation(&mut self) {
        self.refresh_exam();
        if let Err(e) = self.manager.refresh(&self.ctx.store) {
            self.report("Error", e);
        }
    }

    fn refresh_exam(&mut self) {
        match self.exam.refresh_catalogue(&self.ctx.store) {
            Ok(()) => self.sync_exam_selection(),
            Err(e) => self.report("Error", e),
        }
    }

    fn report(&mut self, title: &str, error: QuizError) {
        match &error {
            QuizError::Store(_) | QuizError::StoreClosed => log::error!("{error}"),
            _ => log::debug!("{error}"),
        }
        self.notice = Some(Notice::error(title, error.to_string()));
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn shutdown(&mut self) {
        if let Err(e) = self.ctx.store.close() {
            log::error!("closing the question database failed: {e}");
        }
    }
}
