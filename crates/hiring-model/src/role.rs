//! Semantic roles assigned to raw result-column values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label of the pass role as it appears in configuration and reports.
pub const PASS_LABEL: &str = "합격";
/// Label of the fail role.
pub const FAIL_LABEL: &str = "불합격";
/// Label of the exclusion role. Phase results only.
pub const EXCLUDED_LABEL: &str = "평가제외";
/// Label of the catch-all role.
pub const OTHER_LABEL: &str = "기타";

/// Meaning of a raw phase/final result value.
///
/// Serialized as its display label so that configuration files and stored
/// snapshots read the same way the report does. Labels outside the four
/// built-in ones are kept as [`Role::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Pass,
    Fail,
    Excluded,
    Other,
    Custom(String),
}

impl Role {
    pub fn label(&self) -> &str {
        match self {
            Self::Pass => PASS_LABEL,
            Self::Fail => FAIL_LABEL,
            Self::Excluded => EXCLUDED_LABEL,
            Self::Other => OTHER_LABEL,
            Self::Custom(label) => label,
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            PASS_LABEL => Self::Pass,
            FAIL_LABEL => Self::Fail,
            EXCLUDED_LABEL => Self::Excluded,
            OTHER_LABEL => Self::Other,
            other => Self::Custom(other.to_string()),
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail)
    }

    pub fn is_excluded(&self) -> bool {
        matches!(self, Self::Excluded)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Custom(label) => label,
            other => other.label().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
