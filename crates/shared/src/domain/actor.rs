use crate::{config::Claims, model::Role};

/// The authenticated caller, taken from verified token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i32,
    pub role: Role,
}

impl Actor {
    pub fn new(id: i32, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admins may act on any account; everyone else only on their own.
    pub fn may_access(&self, owner_id: i32) -> bool {
        self.is_admin() || self.id == owner_id
    }
}

impl From<&Claims> for Actor {
    fn from(claims: &Claims) -> Self {
        Actor {
            id: claims.sub,
            role: claims.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_accesses_everything_others_only_themselves() {
        assert!(Actor::new(1, Role::Admin).may_access(42));
        assert!(Actor::new(42, Role::Seller).may_access(42));
        assert!(!Actor::new(7, Role::Seller).may_access(42));
        assert!(!Actor::new(7, Role::User).may_access(42));
    }
}
