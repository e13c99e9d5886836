pub(crate) mod activities;
pub(crate) mod auth;
pub(crate) mod errors;
pub(crate) mod grades_log;
pub(crate) mod guards;
pub(crate) mod handlers;
pub(crate) mod reports;
pub(crate) mod router;
pub(crate) mod teacher_assignments;
pub(crate) mod users;
pub(crate) mod validation;
