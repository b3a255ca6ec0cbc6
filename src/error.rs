use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter the question text.")]
    EmptyPrompt,
    #[error("Option {0} is empty. Fill in every option.")]
    EmptyOption(usize),
    #[error("Mark at least one correct answer.")]
    NoCorrectAnswer,
    #[error("A question needs at least 2 options.")]
    TooFewOptions,
    #[error("A question can have at most 6 options.")]
    TooManyOptions,
    #[error("Correct answer {0} does not match any option.")]
    CorrectOutOfRange(usize),
}

#[derive(Debug, Error)]
pub enum QuizError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Question {0} does not exist.")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Store(#[from] rusqlite::Error),
    #[error("The question database is closed.")]
    StoreClosed,
    #[error("Select at least one answer.")]
    EmptySelection,
    #[error("There is no question to answer.")]
    NoActiveQuestion,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}
