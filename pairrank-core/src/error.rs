/// Error types for session commands.
///
/// Only two things can go wrong in this crate: a vote that does not make
/// sense for the active item set, and an item set with repeated IDs.
/// Everything else (index out of range, degenerate arithmetic, empty sets)
/// resolves to a well-defined value instead of an error.
use thiserror::Error;

use crate::types::ItemId;

/// Why a vote was rejected. Rejected votes never reach the matchup log.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidVote {
    #[error("winner and loser are the same item \"{0}\"")]
    SameItem(ItemId),

    #[error("unknown item ID \"{0}\"")]
    UnknownItem(ItemId),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RankError {
    #[error("invalid vote: {0}")]
    InvalidVote(#[from] InvalidVote),

    #[error("duplicate item ID \"{0}\"")]
    DuplicateItem(ItemId),
}

pub type Result<T> = std::result::Result<T, RankError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err: RankError = InvalidVote::SameItem("7".to_string()).into();
        assert_eq!(err.to_string(), "invalid vote: winner and loser are the same item \"7\"");

        let err = RankError::DuplicateItem("a".to_string());
        assert!(err.to_string().contains("duplicate"));
    }
}
