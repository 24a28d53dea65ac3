pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("no tasks to schedule")]
    NoTasks,

    #[error("task {index}: {reason}")]
    InvalidTask { index: usize, reason: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("input ended before setup was complete")]
    UnexpectedEof,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }

    pub fn invalid_task<S: Into<String>>(index: usize, reason: S) -> Self {
        Error::InvalidTask {
            index,
            reason: reason.into(),
        }
    }
}
