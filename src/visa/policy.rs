use crate::user::model::User;

use super::model::{VisaApplication, VisaStatus};

// The applicant can touch the application only before staff picked it up;
// admins and the assigned agent bypass the window. Absent inputs always
// evaluate to no access.

pub fn can_edit(application: Option<&VisaApplication>, user: Option<&User>) -> bool {
    let (Some(application), Some(user)) = (application, user) else {
        return false;
    };

    if user.admin() || application.agent.as_ref().is_some_and(|agent| agent.is(user)) {
        return true;
    }

    application.applicant.is(user)
        && matches!(
            application.status,
            VisaStatus::Submitted | VisaStatus::AdditionalInfoRequired
        )
}

pub fn can_delete(application: Option<&VisaApplication>, user: Option<&User>) -> bool {
    let (Some(application), Some(user)) = (application, user) else {
        return false;
    };

    user.admin() || (application.applicant.is(user) && application.status == VisaStatus::Submitted)
}
