//! User-defined support-field groups.
//!
//! A group merges one or more raw category values (e.g. "일반행정" and
//! "지역행정") into a single cohort. Groups are kept in the order the user
//! defined them, and that order survives serialization: the definition is
//! written as a JSON/TOML table whose key order is the group order.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ModelError, Result};

/// One named group and the raw category values it subsumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportGroup {
    pub name: String,
    pub raw_values: Vec<String>,
}

impl SupportGroup {
    /// Whether a raw category value (compared trimmed) belongs to this group.
    pub fn contains(&self, raw_value: &str) -> bool {
        let raw_value = raw_value.trim();
        self.raw_values.iter().any(|value| value.trim() == raw_value)
    }
}

/// Ordered set of support groups.
///
/// Group names are unique. Raw values are not required to be disjoint
/// across groups; a row claimed by several groups is counted in each.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupDefinition {
    groups: Vec<SupportGroup>,
}

impl GroupDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a group, rejecting empty or duplicate names.
    pub fn push<I, S>(&mut self, name: impl Into<String>, raw_values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyGroupName);
        }
        if self.get(&name).is_some() {
            return Err(ModelError::DuplicateGroup { name });
        }
        self.groups.push(SupportGroup {
            name,
            raw_values: raw_values.into_iter().map(Into::into).collect(),
        });
        Ok(())
    }

    /// Builder-style [`push`](Self::push).
    pub fn with_group<I, S>(mut self, name: impl Into<String>, raw_values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(name, raw_values)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&SupportGroup> {
        self.groups.iter().find(|group| group.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SupportGroup> {
        self.groups.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Raw values claimed by more than one group.
    pub fn overlapping_values(&self) -> Vec<String> {
        let mut seen: Vec<&str> = Vec::new();
        let mut overlapping: Vec<String> = Vec::new();
        for group in &self.groups {
            let mut own: Vec<&str> = Vec::new();
            for value in &group.raw_values {
                let value = value.trim();
                if own.contains(&value) {
                    continue;
                }
                own.push(value);
                if seen.contains(&value) {
                    if !overlapping.iter().any(|known| known == value) {
                        overlapping.push(value.to_string());
                    }
                } else {
                    seen.push(value);
                }
            }
        }
        overlapping
    }
}

impl Serialize for GroupDefinition {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.name, &group.raw_values)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for GroupDefinition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(GroupDefinitionVisitor)
    }
}

struct GroupDefinitionVisitor;

impl<'de> Visitor<'de> for GroupDefinitionVisitor {
    type Value = GroupDefinition;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a table of group name to raw category values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut definition = GroupDefinition::new();
        while let Some((name, raw_values)) = access.next_entry::<String, Vec<String>>()? {
            definition
                .push(name, raw_values)
                .map_err(serde::de::Error::custom)?;
        }
        Ok(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_document_order() {
        let json = r#"{"행정": ["일반행정", "지역행정"], "기술": ["전산"], "가": []}"#;
        let groups: GroupDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(groups.names().collect::<Vec<_>>(), vec!["행정", "기술", "가"]);
        let back = serde_json::to_string(&groups).unwrap();
        assert_eq!(back, r#"{"행정":["일반행정","지역행정"],"기술":["전산"],"가":[]}"#);
    }

    #[test]
    fn rejects_duplicate_names() {
        let mut groups = GroupDefinition::new();
        groups.push("A", ["x"]).unwrap();
        assert_eq!(
            groups.push("A", ["y"]),
            Err(ModelError::DuplicateGroup {
                name: "A".to_string()
            })
        );
        assert_eq!(groups.push("  ", ["y"]), Err(ModelError::EmptyGroupName));
    }

    #[test]
    fn membership_is_trimmed() {
        let groups = GroupDefinition::new().with_group("A", [" x "]).unwrap();
        let group = groups.get("A").unwrap();
        assert!(group.contains("x"));
        assert!(group.contains("  x"));
        assert!(!group.contains("y"));
    }

    #[test]
    fn reports_overlapping_values() {
        let groups = GroupDefinition::new()
            .with_group("A", ["x", "y"])
            .unwrap()
            .with_group("B", ["y", "z"])
            .unwrap();
        assert_eq!(groups.overlapping_values(), vec!["y".to_string()]);
    }
}
