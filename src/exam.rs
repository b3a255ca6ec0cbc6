use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::QuizError;
use crate::model::Question;
use crate::store::QuestionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    InProgress,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedOption {
    pub text: String,
    pub canonical: usize,
}

/// The question on screen with its options in session order.
#[derive(Debug, Clone)]
pub struct CurrentQuestion {
    pub question: Question,
    pub displayed: Vec<DisplayedOption>,
    pub correct_positions: BTreeSet<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    /// Texts of the correct options, in canonical order.
    Incorrect { correct_texts: Vec<String> },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub answered: usize,
    pub correct: usize,
}

/// Draws questions without replacement and checks answers against the
/// shuffled option order.
pub struct ExamSession<R = StdRng> {
    catalogue: BTreeMap<i64, Question>,
    available: BTreeSet<i64>,
    asked: BTreeSet<i64>,
    current: Option<CurrentQuestion>,
    tally: Tally,
    rng: R,
}

impl ExamSession<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> ExamSession<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            catalogue: BTreeMap::new(),
            available: BTreeSet::new(),
            asked: BTreeSet::new(),
            current: None,
            tally: Tally::default(),
            rng,
        }
    }

    /// Reads the whole table and starts a fresh session over it.
    pub fn load_catalogue(&mut self, store: &QuestionStore) -> Result<(), QuizError> {
        let questions = store.list_all()?;
        self.replace_catalogue(questions);
        self.available = self.catalogue.keys().copied().collect();
        self.asked.clear();
        self.tally = Tally::default();
        info!("exam catalogue loaded with {} questions", self.catalogue.len());
        self.next();
        Ok(())
    }

    /// Picks up questions added, edited or deleted elsewhere without losing
    /// what has already been asked. State is untouched if the read fails.
    pub fn refresh_catalogue(&mut self, store: &QuestionStore) -> Result<(), QuizError> {
        let questions = store.list_all()?;
        self.replace_catalogue(questions);
        let known: BTreeSet<i64> = self.catalogue.keys().copied().collect();
        self.asked.retain(|id| known.contains(id));
        self.available = known.difference(&self.asked).copied().collect();
        debug!(
            "exam catalogue refreshed: {} available, {} asked",
            self.available.len(),
            self.asked.len()
        );
        self.next();
        Ok(())
    }

    fn replace_catalogue(&mut self, questions: Vec<Question>) {
        self.catalogue = questions.into_iter().map(|q| (q.id, q)).collect();
    }

    /// Moves to a random question that has not been asked yet, or to
    /// `Complete` when none is left.
    pub fn next(&mut self) -> SessionState {
        loop {
            if self.available.is_empty() {
                self.current = None;
                return SessionState::Complete;
            }

            let pick = self.rng.gen_range(0..self.available.len());
            let Some(id) = self.available.iter().nth(pick).copied() else {
                self.current = None;
                return SessionState::Complete;
            };
            self.available.remove(&id);
            self.asked.insert(id);

            let Some(question) = self.catalogue.get(&id) else {
                continue;
            };
            if !question.is_presentable() {
                warn!("skipping question {id}: not enough options or no readable answer");
                continue;
            }

            let question = question.clone();
            self.current = Some(self.shuffle(question));
            return SessionState::InProgress;
        }
    }

    fn shuffle(&mut self, question: Question) -> CurrentQuestion {
        let mut displayed: Vec<DisplayedOption> = question
            .options
            .iter()
            .enumerate()
            .map(|(i, text)| DisplayedOption {
                text: text.clone(),
                canonical: i + 1,
            })
            .collect();
        displayed.shuffle(&mut self.rng);

        let correct_positions = displayed
            .iter()
            .enumerate()
            .filter(|(_, o)| question.correct.contains(&o.canonical))
            .map(|(pos, _)| pos)
            .collect();

        CurrentQuestion {
            question,
            displayed,
            correct_positions,
        }
    }

    /// Checks a selection of displayed positions. All-or-nothing: the set must
    /// match the correct positions exactly. Does not advance the session.
    pub fn submit(&mut self, selected: &BTreeSet<usize>) -> Result<Verdict, QuizError> {
        let current = self.current.as_ref().ok_or(QuizError::NoActiveQuestion)?;
        if selected.is_empty() {
            return Err(QuizError::EmptySelection);
        }

        self.tally.answered += 1;
        if *selected == current.correct_positions {
            self.tally.correct += 1;
            return Ok(Verdict::Correct);
        }

        let mut correct: Vec<&DisplayedOption> = current
            .correct_positions
            .iter()
            .filter_map(|&pos| current.displayed.get(pos))
            .collect();
        correct.sort_by_key(|o| o.canonical);
        Ok(Verdict::Incorrect {
            correct_texts: correct.into_iter().map(|o| o.text.clone()).collect(),
        })
    }

    /// Puts every known question back into play.
    pub fn start_new_session(&mut self) -> SessionState {
        self.available = self.catalogue.keys().copied().collect();
        self.asked.clear();
        self.tally = Tally::default();
        info!("new exam session over {} questions", self.available.len());
        self.next()
    }

    pub fn state(&self) -> SessionState {
        if self.current.is_some() {
            SessionState::InProgress
        } else {
            SessionState::Complete
        }
    }

    pub fn current(&self) -> Option<&CurrentQuestion> {
        self.current.as_ref()
    }

    /// (questions drawn so far, questions in the catalogue)
    pub fn progress(&self) -> (usize, usize) {
        (self.asked.len(), self.catalogue.len())
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn available_ids(&self) -> &BTreeSet<i64> {
        &self.available
    }

    pub fn asked_ids(&self) -> &BTreeSet<i64> {
        &self.asked
    }

    pub fn catalogue_len(&self) -> usize {
        self.catalogue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewQuestion;
    use rand::rngs::mock::StepRng;

    fn seeded(seed: u64) -> ExamSession<StdRng> {
        ExamSession::with_rng(StdRng::seed_from_u64(seed))
    }

    fn position_of(current: &CurrentQuestion, text: &str) -> usize {
        current
            .displayed
            .iter()
            .position(|o| o.text == text)
            .expect("option displayed")
    }

    #[test]
    fn empty_store_starts_complete() {
        let store = QuestionStore::open_in_memory().unwrap();
        let mut exam = seeded(1);
        exam.load_catalogue(&store).unwrap();
        assert_eq!(exam.state(), SessionState::Complete);
        assert!(matches!(
            exam.submit(&BTreeSet::from([0])),
            Err(QuizError::NoActiveQuestion)
        ));
    }

    #[test]
    fn single_question_scenario() {
        let store = QuestionStore::open_in_memory().unwrap();
        let id = store
            .create(&NewQuestion::new("Q1", ["A", "B", "C"], [2]))
            .unwrap();

        let mut exam = seeded(7);
        exam.load_catalogue(&store).unwrap();
        let current = exam.current().expect("question shown");
        assert_eq!(current.question.id, id);
        let mut texts: Vec<&str> = current.displayed.iter().map(|o| o.text.as_str()).collect();
        texts.sort_unstable();
        assert_eq!(texts, vec!["A", "B", "C"]);

        let b = position_of(current, "B");
        assert_eq!(exam.submit(&BTreeSet::from([b])).unwrap(), Verdict::Correct);
        assert_eq!(exam.next(), SessionState::Complete);
        assert!(exam.current().is_none());
    }

    #[test]
    fn all_correct_options_must_be_selected() {
        let store = QuestionStore::open_in_memory().unwrap();
        store
            .create(&NewQuestion::new("Q2", ["X", "Y"], [1, 2]))
            .unwrap();

        let mut exam = seeded(3);
        exam.load_catalogue(&store).unwrap();

        assert_eq!(
            exam.submit(&BTreeSet::from([0])).unwrap(),
            Verdict::Incorrect {
                correct_texts: vec!["X".into(), "Y".into()]
            }
        );
        assert_eq!(exam.submit(&BTreeSet::from([0, 1])).unwrap(), Verdict::Correct);
        assert_eq!(exam.tally(), Tally { answered: 2, correct: 1 });
    }

    #[test]
    fn empty_selection_is_rejected_without_advancing() {
        let store = QuestionStore::open_in_memory().unwrap();
        let id = store.create(&NewQuestion::new("Q", ["A", "B"], [1])).unwrap();
        let mut exam = seeded(11);
        exam.load_catalogue(&store).unwrap();

        assert!(matches!(
            exam.submit(&BTreeSet::new()),
            Err(QuizError::EmptySelection)
        ));
        assert_eq!(exam.current().map(|c| c.question.id), Some(id));
        assert_eq!(exam.tally(), Tally::default());
    }

    #[test]
    fn correct_positions_survive_any_shuffle() {
        let store = QuestionStore::open_in_memory().unwrap();
        store
            .create(&NewQuestion::new(
                "Q",
                ["a", "b", "c", "d", "e", "f"],
                [2, 5],
            ))
            .unwrap();

        for seed in 0..50 {
            let mut exam = seeded(seed);
            exam.load_catalogue(&store).unwrap();
            let current = exam.current().unwrap().clone();

            let canon: BTreeSet<usize> = current
                .correct_positions
                .iter()
                .map(|&p| current.displayed[p].canonical)
                .collect();
            assert_eq!(canon, BTreeSet::from([2, 5]));

            assert_eq!(
                exam.submit(&current.correct_positions).unwrap(),
                Verdict::Correct
            );

            let wrong: BTreeSet<usize> = (0..6)
                .filter(|p| !current.correct_positions.contains(p))
                .take(1)
                .chain(current.correct_positions.iter().copied())
                .collect();
            assert_eq!(
                exam.submit(&wrong).unwrap(),
                Verdict::Incorrect {
                    correct_texts: vec!["b".into(), "e".into()]
                }
            );
        }
    }

    #[test]
    fn session_visits_every_question_once() {
        let store = QuestionStore::open_in_memory().unwrap();
        let mut ids = BTreeSet::new();
        for i in 0..5 {
            ids.insert(
                store
                    .create(&NewQuestion::new(format!("Q{i}"), ["A", "B"], [1]))
                    .unwrap(),
            );
        }

        let mut exam = seeded(42);
        exam.load_catalogue(&store).unwrap();
        let mut seen = BTreeSet::new();
        for _ in 0..5 {
            let current = exam.current().expect("question available").clone();
            assert!(seen.insert(current.question.id), "question asked twice");
            exam.submit(&current.correct_positions).unwrap();
            exam.next();
        }
        assert_eq!(seen, ids);
        assert_eq!(exam.state(), SessionState::Complete);
        assert_eq!(exam.progress(), (5, 5));
        assert_eq!(exam.tally(), Tally { answered: 5, correct: 5 });
        assert!(exam.available_ids().is_empty());
    }

    #[test]
    fn zero_rng_picks_lowest_id_first() {
        let store = QuestionStore::open_in_memory().unwrap();
        let first = store.create(&NewQuestion::new("first", ["A", "B"], [1])).unwrap();
        let second = store.create(&NewQuestion::new("second", ["A", "B"], [1])).unwrap();

        let mut exam = ExamSession::with_rng(StepRng::new(0, 0));
        exam.load_catalogue(&store).unwrap();
        assert_eq!(exam.current().map(|c| c.question.id), Some(first));
        exam.next();
        assert_eq!(exam.current().map(|c| c.question.id), Some(second));
    }

    #[test]
    fn malformed_questions_are_skipped_silently() {
        let store = QuestionStore::open_in_memory().unwrap();
        store
            .raw_conn()
            .execute(
                "INSERT INTO questions (question, option1, correct) VALUES ('lonely', 'A', '1')",
                [],
            )
            .unwrap();
        store
            .raw_conn()
            .execute(
                "INSERT INTO questions (question, option1, option2, correct) VALUES ('broken', 'A', 'B', NULL)",
                [],
            )
            .unwrap();

        let mut exam = seeded(5);
        exam.load_catalogue(&store).unwrap();
        assert_eq!(exam.state(), SessionState::Complete);
        assert_eq!(exam.asked_ids().len(), 2);

        let good = store.create(&NewQuestion::new("ok", ["A", "B"], [2])).unwrap();
        exam.refresh_catalogue(&store).unwrap();
        assert_eq!(exam.current().map(|c| c.question.id), Some(good));
    }

    #[test]
    fn refresh_keeps_asked_history() {
        let store = QuestionStore::open_in_memory().unwrap();
        for i in 0..3 {
            store
                .create(&NewQuestion::new(format!("Q{i}"), ["A", "B"], [1]))
                .unwrap();
        }
        let mut exam = seeded(9);
        exam.load_catalogue(&store).unwrap();
        let first = exam.current().unwrap().question.id;

        let added = store.create(&NewQuestion::new("new", ["A", "B"], [2])).unwrap();
        exam.refresh_catalogue(&store).unwrap();

        assert!(exam.asked_ids().contains(&first));
        assert_eq!(exam.asked_ids().len(), 2);
        assert!(exam.available_ids().is_disjoint(exam.asked_ids()));
        let union: BTreeSet<i64> = exam.available_ids().union(exam.asked_ids()).copied().collect();
        assert_eq!(union.len(), 4);
        assert!(union.contains(&added));
    }

    #[test]
    fn deleting_the_current_question_moves_on() {
        let store = QuestionStore::open_in_memory().unwrap();
        store.create(&NewQuestion::new("Q0", ["A", "B"], [1])).unwrap();
        store.create(&NewQuestion::new("Q1", ["A", "B"], [1])).unwrap();

        let mut exam = seeded(2);
        exam.load_catalogue(&store).unwrap();
        let shown = exam.current().unwrap().question.id;
        store.delete(shown).unwrap();

        exam.refresh_catalogue(&store).unwrap();
        let now = exam.current().expect("other question shown").question.id;
        assert_ne!(now, shown);
        assert!(!exam.asked_ids().contains(&shown));
        assert_eq!(exam.catalogue_len(), 1);
    }

    #[test]
    fn failed_refresh_leaves_session_intact() {
        let mut store = QuestionStore::open_in_memory().unwrap();
        store.create(&NewQuestion::new("Q0", ["A", "B"], [1])).unwrap();
        store.create(&NewQuestion::new("Q1", ["A", "B"], [1])).unwrap();

        let mut exam = seeded(4);
        exam.load_catalogue(&store).unwrap();
        let shown = exam.current().unwrap().question.id;
        let asked = exam.asked_ids().clone();

        store.close().unwrap();
        assert!(matches!(
            exam.refresh_catalogue(&store),
            Err(QuizError::StoreClosed)
        ));
        assert_eq!(exam.asked_ids(), &asked);
        assert_eq!(exam.current().map(|c| c.question.id), Some(shown));
    }

    #[test]
    fn new_session_puts_everything_back() {
        let store = QuestionStore::open_in_memory().unwrap();
        store.create(&NewQuestion::new("Q0", ["A", "B"], [1])).unwrap();
        store.create(&NewQuestion::new("Q1", ["A", "B"], [1])).unwrap();

        let mut exam = seeded(8);
        exam.load_catalogue(&store).unwrap();
        exam.submit(&BTreeSet::from([0])).unwrap();
        exam.next();
        exam.next();
        assert_eq!(exam.state(), SessionState::Complete);

        assert_eq!(exam.start_new_session(), SessionState::InProgress);
        assert_eq!(exam.asked_ids().len(), 1);
        assert_eq!(exam.available_ids().len(), 1);
        assert_eq!(exam.tally(), Tally::default());
    }
}
