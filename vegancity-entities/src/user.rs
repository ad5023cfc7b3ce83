use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive as _, ToPrimitive as _};
use thiserror::Error;

use crate::{email::*, id::*};

pub type RolePrimitive = i16;

#[rustfmt::skip]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, FromPrimitive, ToPrimitive)]
pub enum Role {
    #[default]
    Guest = 0,
    User  = 1,
    Staff = 2,
    Admin = 3,
}

impl Role {
    pub fn is_staff(self) -> bool {
        self >= Self::Staff
    }
}

#[derive(Debug, Error)]
#[error("Invalid role primitive: {0}")]
pub struct InvalidRolePrimitive(RolePrimitive);

impl TryFrom<RolePrimitive> for Role {
    type Error = InvalidRolePrimitive;
    fn try_from(from: RolePrimitive) -> Result<Self, Self::Error> {
        Self::from_i16(from).ok_or(InvalidRolePrimitive(from))
    }
}

impl From<Role> for RolePrimitive {
    fn from(from: Role) -> Self {
        // All variants fit into the primitive type
        from.to_i16().unwrap_or_default()
    }
}

/// Local record of a user whose identity is managed elsewhere.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id       : Id,
    pub username : String,
    pub email    : Option<EmailAddress>,
    pub role     : Role,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserProfile {
    pub user_id      : Id,
    pub bio          : Option<String>,
    pub mailing_list : bool,
    pub karma_points : Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_roles() {
        assert!(!Role::Guest.is_staff());
        assert!(!Role::User.is_staff());
        assert!(Role::Staff.is_staff());
        assert!(Role::Admin.is_staff());
    }

    #[test]
    fn role_primitive_roundtrip() {
        for role in [Role::Guest, Role::User, Role::Staff, Role::Admin] {
            assert_eq!(role, Role::try_from(RolePrimitive::from(role)).unwrap());
        }
        assert!(Role::try_from(42).is_err());
    }
}
