//! Raw result value -> semantic role lookup.

use hiring_model::{Role, RoleTable};

/// Resolve a raw result cell against a role table.
///
/// The value is trimmed before lookup; unmapped values resolve to `None`.
pub fn resolve_role(raw_value: &str, table: &RoleTable) -> Option<Role> {
    table.get(raw_value.trim()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RoleTable {
        RoleTable::from([
            ("합".to_string(), Role::Pass),
            ("불".to_string(), Role::Fail),
            ("결시".to_string(), Role::Excluded),
            ("보류".to_string(), Role::Custom("보류".to_string())),
        ])
    }

    #[test]
    fn trims_before_lookup() {
        assert_eq!(resolve_role("  합 ", &table()), Some(Role::Pass));
        assert_eq!(resolve_role("결시", &table()), Some(Role::Excluded));
    }

    #[test]
    fn unmapped_is_none() {
        assert_eq!(resolve_role("", &table()), None);
        assert_eq!(resolve_role("합격", &table()), None);
    }

    #[test]
    fn custom_labels_pass_through() {
        assert_eq!(
            resolve_role("보류", &table()),
            Some(Role::Custom("보류".to_string()))
        );
    }
}
