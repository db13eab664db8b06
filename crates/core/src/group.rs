//! Study-group records and membership shapes.

use serde::{Deserialize, Serialize};

use crate::types::{GroupId, UserId};

/// A row from the backend `groups` table.
///
/// `description` and `created_by` are optional because the membership
/// projection returns only `(id, name)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub description: Option<String>,
    pub created_by: Option<UserId>,
}

/// Request body for creating a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGroup {
    pub name: String,
}

impl NewGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Request body for enrolling a user in a group. Join records carry no
/// other attributes and are never read back directly; group listings go
/// through the relational projection instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGroupMember {
    pub user_id: UserId,
    pub group_id: GroupId,
}

/// One row of the membership projection
/// (`group_members?select=group:groups(id,name)`): the joined group
/// attributes, nested under a `group` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMembershipRow {
    pub group: Group,
}

/// Order groups by display name, case-insensitively. Listings shown to
/// the user are always sorted this way; server return order is not
/// meaningful for groups.
pub fn sort_groups_by_name(groups: &mut [Group]) {
    groups.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str) -> Group {
        Group {
            id: format!("g-{name}"),
            name: name.to_string(),
            description: None,
            created_by: None,
        }
    }

    #[test]
    fn test_sort_is_case_insensitive() {
        let mut groups = vec![group("banana"), group("Apple"), group("cherry")];
        sort_groups_by_name(&mut groups);

        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_projection_row_deserializes_partial_group() {
        let json = r#"{"group": {"id": "g-1", "name": "Algebra"}}"#;
        let row: GroupMembershipRow = serde_json::from_str(json).unwrap();

        assert_eq!(row.group.id, "g-1");
        assert_eq!(row.group.name, "Algebra");
        assert_eq!(row.group.description, None);
        assert_eq!(row.group.created_by, None);
    }
}
