use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::ValidationError;

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 6;

/// How the `correct` column of a stored row was understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerFormat {
    /// Comma-joined canonical indices, e.g. `"1,3"`.
    Current,
    /// Bare integer written by older builds. Rewritten on the next save.
    LegacyInteger,
    /// Could not be read without guessing; the row is flagged.
    Unreadable(String),
}

/// Raw value of the `correct` column as it came out of the table.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCorrect {
    Text(String),
    Integer(i64),
    Missing,
    Unsupported(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: i64,
    pub prompt: String,
    pub options: Vec<String>,    // populated options, canonical index = position + 1
    pub correct: BTreeSet<usize>, // canonical indices (1-based)
    pub raw_correct: String,     // column text as stored, shown in the manager
    pub format: AnswerFormat,
}

impl Question {
    /// Builds a question from a table row.
    ///
    /// Populated option slots are compacted in slot order; correct answers are
    /// remapped from slot numbers to compacted positions. Anything that cannot
    /// be mapped leaves `correct` empty and marks the row `Unreadable`.
    pub fn from_stored(
        id: i64,
        prompt: String,
        slots: [Option<String>; MAX_OPTIONS],
        raw: RawCorrect,
    ) -> Self {
        let populated: Vec<(usize, String)> = slots
            .into_iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.filter(|s| !s.is_empty()).map(|s| (i + 1, s)))
            .collect();

        let raw_correct = match &raw {
            RawCorrect::Text(s) => s.clone(),
            RawCorrect::Integer(n) => n.to_string(),
            RawCorrect::Missing | RawCorrect::Unsupported(_) => String::new(),
        };

        let (entries, mut format) = match parse_correct(&raw) {
            Ok(parsed) => parsed,
            Err(reason) => (Vec::new(), AnswerFormat::Unreadable(reason)),
        };

        let mut correct = BTreeSet::new();
        for slot in entries {
            match populated.iter().position(|(s, _)| *s == slot) {
                Some(pos) => {
                    correct.insert(pos + 1);
                }
                None => {
                    format = AnswerFormat::Unreadable(format!(
                        "answer {slot} points at an empty option"
                    ));
                    correct.clear();
                    break;
                }
            }
        }

        Self {
            id,
            prompt,
            options: populated.into_iter().map(|(_, text)| text).collect(),
            correct,
            raw_correct,
            format,
        }
    }

    /// A question can be asked in an exam only with at least two options and
    /// a readable, non-empty answer set.
    pub fn is_presentable(&self) -> bool {
        self.options.len() >= MIN_OPTIONS
            && !self.correct.is_empty()
            && !matches!(self.format, AnswerFormat::Unreadable(_))
    }

    pub fn is_flagged(&self) -> bool {
        matches!(self.format, AnswerFormat::Unreadable(_))
    }
}

fn parse_correct(raw: &RawCorrect) -> Result<(Vec<usize>, AnswerFormat), String> {
    match raw {
        RawCorrect::Integer(n) => usize::try_from(*n)
            .ok()
            .filter(|n| *n >= 1)
            .map(|n| (vec![n], AnswerFormat::LegacyInteger))
            .ok_or_else(|| format!("answer {n} is not a valid option number")),
        RawCorrect::Text(text) => {
            if text.trim().is_empty() {
                return Err("no correct answer recorded".to_owned());
            }
            let mut entries = Vec::new();
            for token in text.split(',') {
                let n = token
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n >= 1)
                    .ok_or_else(|| format!("unreadable answer entry {:?}", token.trim()))?;
                entries.push(n);
            }
            Ok((entries, AnswerFormat::Current))
        }
        RawCorrect::Missing => Err("no correct answer recorded".to_owned()),
        RawCorrect::Unsupported(kind) => Err(format!("answer column holds {kind}")),
    }
}

/// Field values of a question about to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: BTreeSet<usize>,
}

impl NewQuestion {
    pub fn new(
        prompt: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct: correct.into_iter().collect(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.prompt.trim().is_empty() {
            return Err(ValidationError::EmptyPrompt);
        }
        if self.options.len() < MIN_OPTIONS {
            return Err(ValidationError::TooFewOptions);
        }
        if self.options.len() > MAX_OPTIONS {
            return Err(ValidationError::TooManyOptions);
        }
        if let Some(pos) = self.options.iter().position(|o| o.trim().is_empty()) {
            return Err(ValidationError::EmptyOption(pos + 1));
        }
        if self.correct.is_empty() {
            return Err(ValidationError::NoCorrectAnswer);
        }
        if let Some(&n) = self
            .correct
            .iter()
            .find(|&&n| n == 0 || n > self.options.len())
        {
            return Err(ValidationError::CorrectOutOfRange(n));
        }
        Ok(())
    }

    /// All six option columns; slots past the entered options are `None`.
    pub fn option_slots(&self) -> [Option<&str>; MAX_OPTIONS] {
        let mut slots = [None; MAX_OPTIONS];
        for (slot, option) in slots.iter_mut().zip(&self.options) {
            *slot = Some(option.as_str());
        }
        slots
    }

    pub fn correct_string(&self) -> String {
        join_indices(&self.correct)
    }
}

pub fn join_indices(indices: &BTreeSet<usize>) -> String {
    indices
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tab {
    #[default]
    AddQuestion,
    Exam,
    Manage,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::AddQuestion, Tab::Exam, Tab::Manage];

    pub fn title(self) -> &'static str {
        match self {
            Tab::AddQuestion => "Add Question",
            Tab::Exam => "Exam",
            Tab::Manage => "Manage Questions",
        }
    }
}

/// Preferences kept between runs through eframe storage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiPrefs {
    pub dark_mode: bool,
    pub tab: Tab,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(values: &[Option<&str>]) -> [Option<String>; MAX_OPTIONS] {
        let mut out: [Option<String>; MAX_OPTIONS] = Default::default();
        for (slot, v) in out.iter_mut().zip(values) {
            *slot = v.map(str::to_owned);
        }
        out
    }

    #[test]
    fn current_format_reads_comma_list() {
        let q = Question::from_stored(
            1,
            "Q".into(),
            slots(&[Some("A"), Some("B"), Some("C")]),
            RawCorrect::Text("1,3".into()),
        );
        assert_eq!(q.options, vec!["A", "B", "C"]);
        assert_eq!(q.correct, BTreeSet::from([1, 3]));
        assert_eq!(q.format, AnswerFormat::Current);
        assert!(q.is_presentable());
    }

    #[test]
    fn legacy_integer_is_a_single_answer() {
        let q = Question::from_stored(
            2,
            "Q".into(),
            slots(&[Some("A"), Some("B")]),
            RawCorrect::Integer(2),
        );
        assert_eq!(q.correct, BTreeSet::from([2]));
        assert_eq!(q.format, AnswerFormat::LegacyInteger);
        assert_eq!(q.raw_correct, "2");
        assert!(q.is_presentable());
    }

    #[test]
    fn gaps_are_compacted_and_answers_remapped() {
        let q = Question::from_stored(
            3,
            "Q".into(),
            slots(&[Some("A"), None, Some("C"), Some("")]),
            RawCorrect::Text("3".into()),
        );
        assert_eq!(q.options, vec!["A", "C"]);
        assert_eq!(q.correct, BTreeSet::from([2]));
    }

    #[test]
    fn answer_on_empty_slot_is_flagged() {
        let q = Question::from_stored(
            4,
            "Q".into(),
            slots(&[Some("A"), Some("B")]),
            RawCorrect::Text("1,5".into()),
        );
        assert!(q.is_flagged());
        assert!(q.correct.is_empty());
        assert!(!q.is_presentable());
    }

    #[test]
    fn garbage_and_missing_answers_are_flagged() {
        for raw in [
            RawCorrect::Text("a,b".into()),
            RawCorrect::Text(String::new()),
            RawCorrect::Missing,
            RawCorrect::Integer(0),
            RawCorrect::Unsupported("a real number"),
        ] {
            let q = Question::from_stored(5, "Q".into(), slots(&[Some("A"), Some("B")]), raw);
            assert!(q.is_flagged(), "{:?}", q.format);
            assert!(!q.is_presentable());
        }
    }

    #[test]
    fn validate_reports_the_failed_rule() {
        let ok = NewQuestion::new("Q", ["A", "B"], [1]);
        assert_eq!(ok.validate(), Ok(()));

        assert_eq!(
            NewQuestion::new("  ", ["A", "B"], [1]).validate(),
            Err(ValidationError::EmptyPrompt)
        );
        assert_eq!(
            NewQuestion::new("Q", ["A"], [1]).validate(),
            Err(ValidationError::TooFewOptions)
        );
        assert_eq!(
            NewQuestion::new("Q", ["A", "B", "C", "D", "E", "F", "G"], [1]).validate(),
            Err(ValidationError::TooManyOptions)
        );
        assert_eq!(
            NewQuestion::new("Q", ["A", ""], [1]).validate(),
            Err(ValidationError::EmptyOption(2))
        );
        assert_eq!(
            NewQuestion::new("Q", ["A", "B"], []).validate(),
            Err(ValidationError::NoCorrectAnswer)
        );
        assert_eq!(
            NewQuestion::new("Q", ["A", "B"], [3]).validate(),
            Err(ValidationError::CorrectOutOfRange(3))
        );
    }

    #[test]
    fn option_slots_pad_with_none() {
        let q = NewQuestion::new("Q", ["A", "B", "C"], [2, 1]);
        assert_eq!(
            q.option_slots(),
            [Some("A"), Some("B"), Some("C"), None, None, None]
        );
        assert_eq!(q.correct_string(), "1,2");
    }
}
