use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(ConfigIssue),
    #[error("Board shape does not fit the supported size")]
    InvalidBoardShape,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

/// Which constraint a [`GameConfig`](crate::GameConfig) broke.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("board needs at least one row")]
    NoRows,
    #[error("board needs at least one column")]
    NoColumns,
    #[error("chance of a lit cell must be within [0, 1]")]
    ChanceOutOfRange,
}

impl From<ConfigIssue> for GameError {
    fn from(issue: ConfigIssue) -> Self {
        Self::InvalidConfiguration(issue)
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
