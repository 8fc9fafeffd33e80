//! Company, branch, user and tag identity.

#[derive(Clone, Copy, Debug, Default, Display, From, FromStr, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub i32);

#[derive(Clone, Copy, Debug, Default, Display, From, FromStr, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct BranchId(pub i32);

#[derive(Clone, Copy, Debug, Default, Display, From, FromStr, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i32);

#[derive(Clone, Copy, Debug, Default, Display, From, FromStr, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TagId(pub i32);

/// User references arrive from the picker either as raw ids or as objects
/// carrying `id`/`userId`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum UserSelection {
    Id(UserId),
    Details {
        #[serde(default)]
        id: Option<UserId>,
        #[serde(default, rename = "userId")]
        user_id: Option<UserId>,
    },
}

impl UserSelection {
    /// Flat id of the selection, `None` when the entry carries no id.
    pub fn user_id(&self) -> Option<UserId> {
        match *self {
            UserSelection::Id(id) => Some(id),
            UserSelection::Details { id, user_id } => id.or(user_id),
        }
    }
}

/// Tag references, raw ids or objects carrying `id`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum TagSelection {
    Id(TagId),
    Details {
        #[serde(default)]
        id: Option<TagId>,
    },
}

impl TagSelection {
    pub fn tag_id(&self) -> Option<TagId> {
        match *self {
            TagSelection::Id(id) => Some(id),
            TagSelection::Details { id } => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json;

    #[test]
    fn test_user_selection_forms() {
        let raw: UserSelection = serde_json::from_str("7").unwrap();
        assert_eq!(raw.user_id(), Some(UserId(7)));

        let object: UserSelection = serde_json::from_str(r#"{"userId": 12}"#).unwrap();
        assert_eq!(object.user_id(), Some(UserId(12)));

        let both: UserSelection = serde_json::from_str(r#"{"id": 3, "userId": 12}"#).unwrap();
        assert_eq!(both.user_id(), Some(UserId(3)));

        let empty: UserSelection = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.user_id(), None);
    }

    #[test]
    fn test_tag_selection_forms() {
        let raw: TagSelection = serde_json::from_str("4").unwrap();
        assert_eq!(raw.tag_id(), Some(TagId(4)));

        let object: TagSelection = serde_json::from_str(r#"{"id": 9}"#).unwrap();
        assert_eq!(object.tag_id(), Some(TagId(9)));
    }
}
