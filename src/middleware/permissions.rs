use crate::middleware::auth::Principal;
use crate::utils::error::CustomError;

/// Kind of resource an ownership check guards; selects the 403 message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Post,
    Comment,
}

impl ResourceKind {
    pub fn forbidden_message(self) -> &'static str {
        match self {
            ResourceKind::Post => "You cannot modify another user's post.",
            ResourceKind::Comment => "You cannot modify another user's comment.",
        }
    }
}

/// Only the author may update or delete a post or comment.
pub fn can_mutate(principal_id: i64, author_id: i64) -> bool {
    principal_id == author_id
}

pub fn ensure_can_mutate(
    principal: &Principal,
    author_id: i64,
    kind: ResourceKind,
    resource_id: i64,
) -> Result<(), CustomError> {
    if can_mutate(principal.id, author_id) {
        return Ok(());
    }

    log::warn!(
        "user {} denied write on {:?} {} owned by user {}",
        principal.id,
        kind,
        resource_id,
        author_id
    );
    Err(CustomError::ForbiddenError(kind.forbidden_message().into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(id: i64) -> Principal {
        Principal {
            id,
            username: format!("user{}", id),
        }
    }

    #[test]
    fn author_may_mutate() {
        assert!(can_mutate(3, 3));
        assert!(ensure_can_mutate(&principal(3), 3, ResourceKind::Post, 1).is_ok());
    }

    #[test]
    fn other_users_get_a_resource_specific_denial() {
        assert!(!can_mutate(3, 4));

        match ensure_can_mutate(&principal(3), 4, ResourceKind::Post, 1) {
            Err(CustomError::ForbiddenError(msg)) => assert!(msg.contains("post")),
            other => panic!("expected forbidden, got {:?}", other),
        }
        match ensure_can_mutate(&principal(3), 4, ResourceKind::Comment, 1) {
            Err(CustomError::ForbiddenError(msg)) => assert!(msg.contains("comment")),
            other => panic!("expected forbidden, got {:?}", other),
        }
    }
}
