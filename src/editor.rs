use log::info;

use crate::error::{QuizError, ValidationError};
use crate::model::{MAX_OPTIONS, MIN_OPTIONS, NewQuestion};
use crate::store::QuestionStore;

/// One option row in the editor. Correctness lives on the row, so removing a
/// row shifts the canonical index of every later row with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionDraft {
    pub text: String,
    pub correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(i64),
    Updated(i64),
}

impl SaveOutcome {
    pub fn id(self) -> i64 {
        match self {
            SaveOutcome::Created(id) | SaveOutcome::Updated(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionEditor {
    prompt: String,
    options: Vec<OptionDraft>,
    editing_id: Option<i64>,
}

impl Default for QuestionEditor {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            options: vec![OptionDraft::default(); MIN_OPTIONS],
            editing_id: None,
        }
    }
}

impl QuestionEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_new(&mut self) {
        *self = Self::default();
    }

    pub fn cancel_edit(&mut self) {
        self.start_new();
    }

    /// Loads a stored question into the form. The form is untouched on error.
    pub fn start_edit(&mut self, store: &QuestionStore, id: i64) -> Result<(), QuizError> {
        let question = store.get(id)?;
        self.prompt = question.prompt;
        self.options = question
            .options
            .into_iter()
            .enumerate()
            .map(|(i, text)| OptionDraft {
                text,
                correct: question.correct.contains(&(i + 1)),
            })
            .collect();
        // legacy rows may hold fewer than two options
        while self.options.len() < MIN_OPTIONS {
            self.options.push(OptionDraft::default());
        }
        self.editing_id = Some(id);
        info!("editing question {id}");
        Ok(())
    }

    pub fn add_option(&mut self) -> Result<(), ValidationError> {
        if self.options.len() >= MAX_OPTIONS {
            return Err(ValidationError::TooManyOptions);
        }
        self.options.push(OptionDraft::default());
        Ok(())
    }

    pub fn remove_option(&mut self) -> Result<(), ValidationError> {
        if self.options.len() <= MIN_OPTIONS {
            return Err(ValidationError::TooFewOptions);
        }
        self.options.pop();
        Ok(())
    }

    /// The question as it would be written right now.
    pub fn draft(&self) -> NewQuestion {
        NewQuestion {
            prompt: self.prompt.clone(),
            options: self.options.iter().map(|o| o.text.clone()).collect(),
            correct: self
                .options
                .iter()
                .enumerate()
                .filter(|(_, o)| o.correct)
                .map(|(i, _)| i + 1)
                .collect(),
        }
    }

    /// Validates and writes the draft, then resets the form.
    ///
    /// On any error nothing is written and the draft is kept so the user can
    /// fix it.
    pub fn save(&mut self, store: &QuestionStore) -> Result<SaveOutcome, QuizError> {
        let draft = self.draft();
        draft.validate()?;

        let outcome = match self.editing_id {
            None => SaveOutcome::Created(store.create(&draft)?),
            Some(id) => {
                store.update(id, &draft)?;
                SaveOutcome::Updated(id)
            }
        };
        self.start_new();
        Ok(outcome)
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn prompt_mut(&mut self) -> &mut String {
        &mut self.prompt
    }

    pub fn options(&self) -> &[OptionDraft] {
        &self.options
    }

    /// Rows are editable in place; the count only changes through
    /// `add_option` / `remove_option`.
    pub fn options_mut(&mut self) -> &mut [OptionDraft] {
        &mut self.options
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.editing_id
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }
}
