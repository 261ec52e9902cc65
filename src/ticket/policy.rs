use crate::user::model::{Role, User};

use super::model::Ticket;

// Tickets have the broadest status rules of the four workflows: the creator
// may move their own ticket (self-close included). Delete and assign stay
// with back-office roles. Absent inputs always evaluate to no access.

pub fn can_delete(ticket: Option<&Ticket>, user: Option<&User>) -> bool {
    let (Some(_), Some(user)) = (ticket, user) else {
        return false;
    };

    user.admin()
}

pub fn can_assign(user: Option<&User>) -> bool {
    let Some(user) = user else {
        return false;
    };

    user.admin() || user.role == Role::Support
}

pub fn can_change_status(ticket: Option<&Ticket>, user: Option<&User>) -> bool {
    let (Some(ticket), Some(user)) = (ticket, user) else {
        return false;
    };

    user.admin()
        || user.role == Role::Support
        || user.role == Role::Agent
        || ticket
            .assigned_to
            .as_ref()
            .is_some_and(|staff| staff.is(user))
        || ticket.user.is(user)
}
