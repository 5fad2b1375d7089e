use std::path::PathBuf;

/// Errors from applying a move to the board or game session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is out of range")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("game is already over")]
    GameOver,
}

/// Errors from constructing a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board must be at least 4x4, got {rows}x{cols}")]
    TooSmall { rows: usize, cols: usize },
}

/// Errors that can occur while playing agents against each other.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("{agent} found no move on an undecided board")]
    NoMove { agent: String },

    #[error("{agent} played an illegal move: {source}")]
    IllegalMove { agent: String, source: MoveError },

    #[error("board error: {0}")]
    Board(#[from] BoardError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        assert_eq!(MoveError::ColumnFull(2).to_string(), "column 2 is full");
        assert_eq!(
            MoveError::InvalidColumn(9).to_string(),
            "column 9 is out of range"
        );
        assert_eq!(MoveError::GameOver.to_string(), "game is already over");
    }

    #[test]
    fn test_board_error_display() {
        let err = BoardError::TooSmall { rows: 3, cols: 7 };
        assert_eq!(err.to_string(), "board must be at least 4x4, got 3x7");
    }

    #[test]
    fn test_match_error_display() {
        let err = MatchError::IllegalMove {
            agent: "Random".to_string(),
            source: MoveError::ColumnFull(4),
        };
        assert_eq!(err.to_string(), "Random played an illegal move: column 4 is full");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("search.depth must be >= 1".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: search.depth must be >= 1"
        );
    }
}
