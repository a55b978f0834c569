//! Review status catalog.

use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Review outcome codes the bot knows how to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub const ALL: [ReviewStatus; 2] = [ReviewStatus::Approved, ReviewStatus::Rejected];

    /// Raw code as sent by the review API.
    pub fn code(self) -> &'static str {
        match self {
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }

    /// Text shown to the learner.
    pub fn verdict(self) -> &'static str {
        match self {
            ReviewStatus::Approved => {
                "Ревьюеру всё понравилось, можно приступать к следующему уроку."
            }
            ReviewStatus::Rejected => "К сожалению в работе нашлись ошибки.",
        }
    }
}

impl FromStr for ReviewStatus {
    type Err = AppError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.code() == code)
            .ok_or_else(|| AppError::UnknownStatus(code.to_string()))
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Verdict text for a raw status code.
pub fn verdict_for(code: &str) -> crate::error::Result<&'static str> {
    code.parse::<ReviewStatus>().map(ReviewStatus::verdict)
}
