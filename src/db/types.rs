use serde::Serialize;

/// Rows of the `roles` table. Unknown ids are kept as `Other` so a new role
/// in the database never breaks user loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Role {
    Admin,
    Teacher,
    Student,
    Other,
}

impl Role {
    pub(crate) const STUDENT_ID: i32 = 3;

    pub(crate) fn from_id(role_id: i32) -> Self {
        match role_id {
            1 => Self::Admin,
            2 => Self::Teacher,
            Self::STUDENT_ID => Self::Student,
            _ => Self::Other,
        }
    }

    /// Staff may read any student's records.
    pub(crate) fn is_staff(self) -> bool {
        matches!(self, Self::Admin | Self::Teacher)
    }
}
