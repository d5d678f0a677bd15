//! Operator authorization.
//!
//! - [`AccessLevel`] - totally ordered authorization tiers
//! - [`Authorizer`] - maps a [`LocalActor`]'s groups to a level and enforces
//!   minimum-level checks
//! - [`LocalActor`] - the OS identity of the invoking user

pub mod actor;

pub use actor::LocalActor;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TdsError};

/// Authorization tier, ordered from least to most privileged.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// Account exists but may not run anything privileged.
    Disabled,
    /// Development environments.
    Dev,
    /// Staging environments.
    Stage,
    /// Production environments.
    Prod,
    /// Everything.
    Admin,
}

impl AccessLevel {
    /// All levels in ascending order.
    pub const ALL: [AccessLevel; 5] = [
        Self::Disabled,
        Self::Dev,
        Self::Stage,
        Self::Prod,
        Self::Admin,
    ];

    /// Lower-case name, as used in parameters and credential file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Dev => "dev",
            Self::Stage => "stage",
            Self::Prod => "prod",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "disabled" => Ok(Self::Disabled),
            "dev" => Ok(Self::Dev),
            "stage" => Ok(Self::Stage),
            "prod" => Ok(Self::Prod),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("unknown access level: {}", s)),
        }
    }
}

/// Group memberships that grant an access level.
pub const DEFAULT_GROUP_LEVELS: &[(&str, AccessLevel)] = &[
    ("tdsdisabled", AccessLevel::Disabled),
    ("engteam", AccessLevel::Dev),
    ("stageteam", AccessLevel::Stage),
    ("prodteam", AccessLevel::Prod),
    ("siteops", AccessLevel::Admin),
];

/// Resolves operators to access levels and enforces minimums.
#[derive(Debug, Clone)]
pub struct Authorizer {
    group_levels: Vec<(String, AccessLevel)>,
}

impl Default for Authorizer {
    fn default() -> Self {
        Self::new(DEFAULT_GROUP_LEVELS.iter().map(|(g, l)| (g.to_string(), *l)))
    }
}

impl Authorizer {
    /// Create an authorizer with a custom group mapping.
    pub fn new(group_levels: impl IntoIterator<Item = (String, AccessLevel)>) -> Self {
        Self {
            group_levels: group_levels.into_iter().collect(),
        }
    }

    /// Highest level granted by any of the actor's groups, or `None` if no
    /// group maps.
    pub fn resolve_level(&self, actor: &LocalActor) -> Option<AccessLevel> {
        let level = actor
            .groups
            .iter()
            .filter_map(|group| {
                self.group_levels
                    .iter()
                    .find(|(name, _)| name == group)
                    .map(|(_, level)| *level)
            })
            .max();

        tracing::trace!("Resolved level for {}: {:?}", actor.name, level);
        level
    }

    /// Fail unless `level` is present and at least `minimum`.
    ///
    /// The error carries `account` so the caller can tell the operator which
    /// account was refused.
    pub fn require(level: Option<AccessLevel>, minimum: AccessLevel, account: &str) -> Result<()> {
        match level {
            Some(level) if level >= minimum => Ok(()),
            _ => Err(TdsError::InsufficientAccess {
                account: account.to_string(),
                level,
                required: minimum,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn actor(groups: &[&str]) -> LocalActor {
        LocalActor::new("jdoe", groups.iter().map(|g| g.to_string()).collect())
    }

    #[test]
    fn levels_are_totally_ordered() {
        for pair in AccessLevel::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert!(AccessLevel::Disabled < AccessLevel::Admin);
    }

    #[test]
    fn level_round_trips_through_str() {
        for level in AccessLevel::ALL {
            assert_eq!(level.as_str().parse::<AccessLevel>(), Ok(level));
        }
        assert_eq!("DEV".parse::<AccessLevel>(), Ok(AccessLevel::Dev));
        assert!("root".parse::<AccessLevel>().is_err());
    }

    #[test]
    fn resolve_level_no_groups() {
        let auth = Authorizer::default();
        assert_eq!(auth.resolve_level(&actor(&[])), None);
    }

    #[test]
    fn resolve_level_unmapped_groups() {
        let auth = Authorizer::default();
        assert_eq!(auth.resolve_level(&actor(&["wheel", "users"])), None);
    }

    #[test]
    fn resolve_level_single_group() {
        let auth = Authorizer::default();
        assert_eq!(
            auth.resolve_level(&actor(&["users", "engteam"])),
            Some(AccessLevel::Dev)
        );
    }

    #[test]
    fn resolve_level_takes_highest() {
        let auth = Authorizer::default();
        assert_eq!(
            auth.resolve_level(&actor(&["engteam", "siteops", "stageteam"])),
            Some(AccessLevel::Admin)
        );
        assert_eq!(
            auth.resolve_level(&actor(&["prodteam", "engteam"])),
            Some(AccessLevel::Prod)
        );
    }

    #[test]
    fn resolve_level_disabled_group_is_a_level() {
        let auth = Authorizer::default();
        assert_eq!(
            auth.resolve_level(&actor(&["tdsdisabled"])),
            Some(AccessLevel::Disabled)
        );
    }

    #[test]
    fn resolve_level_custom_mapping() {
        let auth = Authorizer::new(vec![("ops".to_string(), AccessLevel::Stage)]);
        assert_eq!(
            auth.resolve_level(&actor(&["ops", "engteam"])),
            Some(AccessLevel::Stage)
        );
    }

    #[test]
    fn require_passes_at_and_above_minimum() {
        assert!(Authorizer::require(Some(AccessLevel::Dev), AccessLevel::Dev, "jdoe").is_ok());
        assert!(Authorizer::require(Some(AccessLevel::Admin), AccessLevel::Dev, "jdoe").is_ok());
    }

    #[test]
    fn require_fails_below_minimum() {
        let err =
            Authorizer::require(Some(AccessLevel::Disabled), AccessLevel::Dev, "jdoe").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Access);
        assert!(err.to_string().contains("jdoe"));
    }

    #[test]
    fn require_fails_without_level() {
        let err = Authorizer::require(None, AccessLevel::Disabled, "jdoe").unwrap_err();
        assert!(matches!(
            err,
            TdsError::InsufficientAccess { ref account, level: None, .. } if account == "jdoe"
        ));
    }

    #[test]
    fn require_matches_ordering_for_every_pair() {
        for level in AccessLevel::ALL {
            for minimum in AccessLevel::ALL {
                let ok = Authorizer::require(Some(level), minimum, "jdoe").is_ok();
                assert_eq!(ok, level >= minimum, "{} vs {}", level, minimum);
            }
        }
    }
}
