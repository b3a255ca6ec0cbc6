// src/view_models.rs

use crate::exam::Tally;
use crate::model::{AnswerFormat, Question};

/// One line of the "Manage Questions" table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionRow {
    pub id: i64,
    pub prompt: String,
    pub options_text: String, // "1. A\n2. B"
    pub raw_correct: String,
    pub flag: Option<String>,
}

impl QuestionRow {
    pub fn from_question(q: &Question) -> Self {
        let options_text = q
            .options
            .iter()
            .enumerate()
            .map(|(i, text)| format!("{}. {}", i + 1, text))
            .collect::<Vec<_>>()
            .join("\n");
        let flag = match &q.format {
            AnswerFormat::Current => None,
            AnswerFormat::LegacyInteger => Some("old answer format, saved anew on edit".to_owned()),
            AnswerFormat::Unreadable(reason) => Some(reason.clone()),
        };
        Self {
            id: q.id,
            prompt: q.prompt.clone(),
            options_text,
            raw_correct: q.raw_correct.clone(),
            flag,
        }
    }

    pub fn correct_label(&self) -> String {
        match &self.flag {
            Some(_) => format!("{} ⚠", self.raw_correct),
            None => self.raw_correct.clone(),
        }
    }
}

impl Tally {
    pub fn label(&self) -> String {
        if self.answered == 0 {
            "No answers given in this session.".to_owned()
        } else {
            format!(
                "Correct answers: {} of {} ({}%)",
                self.correct,
                self.answered,
                self.correct * 100 / self.answered
            )
        }
    }
}
