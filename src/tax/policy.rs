use crate::user::model::{Role, User};

use super::model::{TaxCase, TaxStatus};

// The client's editing window is bounded by the case status; staff roles
// bypass the window unconditionally. Absent inputs always evaluate to no
// access.

pub fn can_edit(case: Option<&TaxCase>, user: Option<&User>) -> bool {
    let (Some(case), Some(user)) = (case, user) else {
        return false;
    };

    if staff_on_case(case, user) {
        return true;
    }

    case.client.is(user)
        && matches!(case.status, TaxStatus::Pending | TaxStatus::RevisionNeeded)
}

pub fn can_delete(case: Option<&TaxCase>, user: Option<&User>) -> bool {
    let (Some(case), Some(user)) = (case, user) else {
        return false;
    };

    user.admin() || (case.client.is(user) && case.status == TaxStatus::Pending)
}

pub fn can_change_status(case: Option<&TaxCase>, user: Option<&User>) -> bool {
    let (Some(case), Some(user)) = (case, user) else {
        return false;
    };

    staff_on_case(case, user)
}

fn staff_on_case(case: &TaxCase, user: &User) -> bool {
    user.admin()
        || user.role == Role::Support
        || case
            .tax_professional
            .as_ref()
            .is_some_and(|pro| pro.is(user))
}
