use serde::Deserialize;

use super::board::Board;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required query params: board, roll, reg, year")]
    MissingParams,
    #[error("Invalid board")]
    InvalidBoard,
}

/// Raw `/result` query string. Every field is optional so a missing one
/// surfaces as a `ValidationError` instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ResultParams {
    pub board: Option<String>,
    pub roll: Option<String>,
    pub reg: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultQuery {
    pub board: Board,
    /// Board exactly as the caller spelled it.
    pub raw_board: String,
    pub roll: String,
    pub reg: String,
    pub year: String,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl TryFrom<ResultParams> for ResultQuery {
    type Error = ValidationError;

    fn try_from(params: ResultParams) -> Result<Self, Self::Error> {
        let (Some(raw_board), Some(roll), Some(reg), Some(year)) = (
            present(params.board),
            present(params.roll),
            present(params.reg),
            present(params.year),
        ) else {
            return Err(ValidationError::MissingParams);
        };

        let board = raw_board
            .parse::<Board>()
            .map_err(|_| ValidationError::InvalidBoard)?;

        Ok(ResultQuery {
            board,
            raw_board,
            roll,
            reg,
            year,
        })
    }
}
