use std::path::Path;

use log::{debug, info, warn};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::QuizError;
use crate::model::{MAX_OPTIONS, NewQuestion, Question, RawCorrect};

const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS questions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        question TEXT,
        option1 TEXT,
        option2 TEXT,
        option3 TEXT,
        option4 TEXT,
        option5 TEXT,
        option6 TEXT,
        correct TEXT
    )";

const REBUILD_LEGACY_TABLE: &str = "
    ALTER TABLE questions RENAME TO questions_legacy;
    CREATE TABLE questions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        question TEXT,
        option1 TEXT,
        option2 TEXT,
        option3 TEXT,
        option4 TEXT,
        option5 TEXT,
        option6 TEXT,
        correct TEXT
    );
    INSERT INTO questions (id, question, option1, option2, option3, option4, option5, option6, correct)
        SELECT id, question, option1, option2, option3, option4, option5, option6, correct
        FROM questions_legacy;
    DROP TABLE questions_legacy;";

const SELECT_COLUMNS: &str = "SELECT id, question, option1, option2, option3, option4, option5, option6, correct FROM questions";

/// The `questions` table behind a single SQLite connection.
///
/// Each call is one statement in auto-commit mode, so every operation is its
/// own transaction.
pub struct QuestionStore {
    conn: Option<Connection>,
}

impl QuestionStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, QuizError> {
        let path = path.as_ref();
        info!("opening question database at {}", path.display());
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, QuizError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, QuizError> {
        conn.execute_batch(CREATE_TABLE)?;
        Ok(Self { conn: Some(conn) })
    }

    fn conn(&self) -> Result<&Connection, QuizError> {
        self.conn.as_ref().ok_or(QuizError::StoreClosed)
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Closes the connection. Later calls fail with `StoreClosed`.
    pub fn close(&mut self) -> Result<(), QuizError> {
        match self.conn.take() {
            Some(conn) => {
                conn.close().map_err(|(_, e)| QuizError::Store(e))?;
                info!("question database closed");
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Older databases declared `correct` as INTEGER, where SQLite turns a
    /// written `"2"` back into a number. Before the first write such a table
    /// is rebuilt with a TEXT column, which stores every old answer as text.
    fn ensure_text_answers(&self) -> Result<(), QuizError> {
        let conn = self.conn()?;
        let declared: Option<String> = conn
            .query_row(
                "SELECT type FROM pragma_table_info('questions') WHERE name = 'correct'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        if declared.is_none_or(|t| t.eq_ignore_ascii_case("TEXT")) {
            return Ok(());
        }

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(REBUILD_LEGACY_TABLE)?;
        tx.commit()?;
        info!("migrated the answer column of the question table to text");
        Ok(())
    }

    pub fn create(&self, question: &NewQuestion) -> Result<i64, QuizError> {
        question.validate()?;
        self.ensure_text_answers()?;
        let conn = self.conn()?;
        let [o1, o2, o3, o4, o5, o6] = question.option_slots();
        conn.execute(
            "INSERT INTO questions (question, option1, option2, option3, option4, option5, option6, correct)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![question.prompt, o1, o2, o3, o4, o5, o6, question.correct_string()],
        )?;
        let id = conn.last_insert_rowid();
        info!("question {id} created");
        Ok(id)
    }

    pub fn get(&self, id: i64) -> Result<Question, QuizError> {
        debug!("loading question {id}");
        self.conn()?
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                params![id],
                row_to_question,
            )
            .optional()?
            .ok_or(QuizError::NotFound(id))
    }

    pub fn list_all(&self) -> Result<Vec<Question>, QuizError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
        let questions = stmt
            .query_map([], row_to_question)?
            .collect::<Result<Vec<_>, _>>()?;

        for q in questions.iter().filter(|q| q.is_flagged()) {
            warn!("question {} has an unreadable answer column {:?}", q.id, q.raw_correct);
        }
        debug!("loaded {} questions", questions.len());
        Ok(questions)
    }

    pub fn update(&self, id: i64, question: &NewQuestion) -> Result<(), QuizError> {
        question.validate()?;
        self.ensure_text_answers()?;
        let [o1, o2, o3, o4, o5, o6] = question.option_slots();
        let changed = self.conn()?.execute(
            "UPDATE questions
             SET question = ?1, option1 = ?2, option2 = ?3, option3 = ?4,
                 option4 = ?5, option5 = ?6, option6 = ?7, correct = ?8
             WHERE id = ?9",
            params![question.prompt, o1, o2, o3, o4, o5, o6, question.correct_string(), id],
        )?;
        if changed == 0 {
            return Err(QuizError::NotFound(id));
        }
        info!("question {id} updated");
        Ok(())
    }

    pub fn delete(&self, id: i64) -> Result<(), QuizError> {
        let changed = self
            .conn()?
            .execute("DELETE FROM questions WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(QuizError::NotFound(id));
        }
        info!("question {id} deleted");
        Ok(())
    }

    pub fn count(&self) -> Result<usize, QuizError> {
        let n: i64 = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))?;
        Ok(usize::try_from(n).unwrap_or_default())
    }

    #[cfg(test)]
    pub(crate) fn raw_conn(&self) -> &Connection {
        self.conn.as_ref().expect("store open")
    }

    /// Opens a database whose `correct` column was declared INTEGER, the way
    /// older databases stored a single answer.
    #[cfg(test)]
    pub(crate) fn open_legacy<P: AsRef<Path>>(path: P) -> Result<Self, QuizError> {
        Connection::open(path.as_ref())?.execute_batch(
            "CREATE TABLE questions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                question TEXT,
                option1 TEXT, option2 TEXT, option3 TEXT,
                option4 TEXT, option5 TEXT, option6 TEXT,
                correct INTEGER
            )",
        )?;
        Self::open(path)
    }
}

fn row_to_question(row: &Row<'_>) -> rusqlite::Result<Question> {
    let id: i64 = row.get(0)?;
    let prompt: Option<String> = row.get(1)?;
    let mut slots: [Option<String>; MAX_OPTIONS] = Default::default();
    for (i, slot) in slots.iter_mut().enumerate() {
        *slot = row.get(2 + i)?;
    }
    let raw = match row.get::<_, Value>(2 + MAX_OPTIONS)? {
        Value::Text(s) => RawCorrect::Text(s),
        Value::Integer(n) => RawCorrect::Integer(n),
        Value::Null => RawCorrect::Missing,
        Value::Real(_) => RawCorrect::Unsupported("a real number"),
        Value::Blob(_) => RawCorrect::Unsupported("binary data"),
    };
    Ok(Question::from_stored(id, prompt.unwrap_or_default(), slots, raw))
}
