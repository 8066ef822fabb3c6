use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Group {
    #[serde(rename = "_id")]
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// Groups are provisioned through the store only; the API never creates them.
#[derive(Debug, Clone)]
pub struct NewGroup {
    pub title: String,
    pub slug: String,
    pub description: String,
}

impl NewGroup {
    pub fn with_id(self, id: i64) -> Group {
        Group {
            id,
            title: self.title,
            slug: self.slug,
            description: self.description,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct GroupView {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}

impl From<Group> for GroupView {
    fn from(group: Group) -> Self {
        GroupView {
            id: group.id,
            title: group.title,
            slug: group.slug,
            description: group.description,
        }
    }
}
