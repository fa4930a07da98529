use crate::model::OrderStatus;
use crate::order_actor::OrderError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Rule applied when an order's status is replaced.
///
/// `Permissive` accepts any target status. `Strict` accepts the current status
/// or the single next step and rejects everything else with
/// [`OrderError::IllegalTransition`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    #[default]
    Permissive,
    Strict,
}

impl TransitionPolicy {
    pub fn check(self, from: OrderStatus, to: OrderStatus) -> Result<(), OrderError> {
        match self {
            TransitionPolicy::Permissive => Ok(()),
            TransitionPolicy::Strict if from == to || from.next() == Some(to) => Ok(()),
            TransitionPolicy::Strict => Err(OrderError::IllegalTransition { from, to }),
        }
    }
}

impl Display for TransitionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionPolicy::Permissive => f.write_str("permissive"),
            TransitionPolicy::Strict => f.write_str("strict"),
        }
    }
}

impl FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "permissive" => Ok(TransitionPolicy::Permissive),
            "strict" => Ok(TransitionPolicy::Strict),
            other => Err(format!("unknown transition policy: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderStatus::*;

    #[test]
    fn test_permissive_accepts_everything() {
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                assert!(TransitionPolicy::Permissive.check(from, to).is_ok());
            }
        }
    }

    #[test]
    fn test_strict_allows_single_forward_step() {
        let strict = TransitionPolicy::Strict;
        assert!(strict.check(New, Preparing).is_ok());
        assert!(strict.check(Ready, Completed).is_ok());
        assert!(strict.check(Ready, Ready).is_ok());

        assert_eq!(
            strict.check(New, Ready),
            Err(OrderError::IllegalTransition { from: New, to: Ready })
        );
        assert!(strict.check(Completed, New).is_err());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("STRICT".parse::<TransitionPolicy>(), Ok(TransitionPolicy::Strict));
        assert!("lenient".parse::<TransitionPolicy>().is_err());
    }
}
