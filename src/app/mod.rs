use crate::editor::QuestionEditor;
use crate::exam::ExamSession;
use crate::manager::QuestionManager;
use crate::model::{Tab, UiPrefs};
use crate::store::QuestionStore;

// action handlers and tab switching
pub mod actions;
pub mod navigation;

/// Process-wide resources, opened once at startup and closed on exit.
pub struct AppContext {
    pub store: QuestionStore,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// A blocking message shown over the current tab until dismissed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            body: body.into(),
        }
    }
}

pub struct ExamApp {
    pub ctx: AppContext,
    pub editor: QuestionEditor,
    pub exam: ExamSession,
    pub manager: QuestionManager,
    pub prefs: UiPrefs,
    pub exam_selection: Vec<bool>, // one checkbox per displayed option
    pub notice: Option<Notice>,
}

impl ExamApp {
    pub fn new(store: QuestionStore) -> Self {
        Self::with_session(store, ExamSession::new())
    }

    /// Builds the app around an existing session; tests pass a seeded one.
    pub fn with_session(store: QuestionStore, exam: ExamSession) -> Self {
        let mut app = Self {
            ctx: AppContext { store },
            editor: QuestionEditor::new(),
            exam,
            manager: QuestionManager::new(),
            prefs: UiPrefs::default(),
            exam_selection: Vec::new(),
            notice: None,
        };

        if let Err(e) = app.exam.load_catalogue(&app.ctx.store) {
            log::error!("could not load questions for the exam: {e}");
            app.notice = Some(Notice::error("Error", e.to_string()));
        }
        if let Err(e) = app.manager.refresh(&app.ctx.store) {
            log::error!("could not load the question list: {e}");
            app.notice = Some(Notice::error("Error", e.to_string()));
        }
        app.sync_exam_selection();
        app
    }

    pub fn with_prefs(mut self, prefs: UiPrefs) -> Self {
        self.prefs = prefs;
        self
    }

    pub fn tab(&self) -> Tab {
        self.prefs.tab
    }
}
