use std::sync::Arc;

use crate::database::ResourceStore;
use crate::group::model::Group;
use crate::utils::error::CustomError;

pub const GROUP_NOT_FOUND: &str = "Group not found.";

/// Read-only view over groups.
pub struct GroupService {
    store: Arc<dyn ResourceStore>,
}

impl GroupService {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        GroupService { store }
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>, CustomError> {
        self.store.list_groups().await
    }

    pub async fn get_group(&self, id: i64) -> Result<Group, CustomError> {
        self.store
            .get_group(id)
            .await?
            .ok_or_else(|| CustomError::NotFoundError(GROUP_NOT_FOUND.into()))
    }
}
