pub(crate) mod activities;
pub(crate) mod grades_log;
pub(crate) mod health;
pub(crate) mod teacher_assignments;
pub(crate) mod users;
