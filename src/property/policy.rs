use crate::user::model::User;

use super::model::Property;

// Listings carry no status workflow; rights depend only on who you are
// relative to the record. Absent inputs always evaluate to no access.

pub fn can_edit(property: Option<&Property>, user: Option<&User>) -> bool {
    let (Some(property), Some(user)) = (property, user) else {
        return false;
    };

    user.admin()
        || property.owner.is(user)
        || property.agent.as_ref().is_some_and(|agent| agent.is(user))
}

pub fn can_delete(property: Option<&Property>, user: Option<&User>) -> bool {
    can_edit(property, user)
}
