use log::warn;
use std::str::FromStr;
use thiserror::Error;

use super::entities::{Action, Amount};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("unrecognized action label {0:?}")]
    UnrecognizedAction(String),
}

/// The decision shown next to a seat, without the amount.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl FromStr for ActionKind {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fold" => Ok(Self::Fold),
            "check" => Ok(Self::Check),
            "call" => Ok(Self::Call),
            "bet" => Ok(Self::Bet),
            "raise" => Ok(Self::Raise),
            _ => Err(ClassifyError::UnrecognizedAction(s.trim().to_string())),
        }
    }
}

/// Turns an action label and the two stack readings around a turn into an
/// [`Action`]. The amount is whatever left the stack; a stack that grew
/// is logged and recorded as a zero amount.
pub fn classify(label: &str, previous: Amount, observed: Amount) -> Result<Action, ClassifyError> {
    let kind: ActionKind = label.parse()?;
    let amount = || {
        Amount::checked_delta(previous, observed).unwrap_or_else(|| {
            warn!("stack went from {previous} to {observed} on a {label:?}, recording zero");
            Amount::ZERO
        })
    };
    let action = match kind {
        ActionKind::Fold => Action::Fold,
        ActionKind::Check => Action::Check,
        ActionKind::Call => Action::Call { amount: amount() },
        ActionKind::Bet => Action::Bet { amount: amount() },
        ActionKind::Raise => Action::Raise { amount: amount() },
    };
    Ok(action)
}
