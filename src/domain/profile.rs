//! User profile persisted alongside the business entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable, NamedEntity};

/// Profile record for an authenticated user. `is_admin` is the single source
/// of truth for privileges; the configured admin email only seeds it when the
/// profile is first created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(
        id: Uuid,
        display_name: impl Into<String>,
        email: impl Into<String>,
        is_admin: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            display_name: display_name.into(),
            email: email.into(),
            is_admin,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Identifiable for UserProfile {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for UserProfile {
    fn name(&self) -> &str {
        &self.display_name
    }
}

impl Displayable for UserProfile {
    fn display_label(&self) -> String {
        format!("{} <{}>", self.display_name, self.email)
    }
}
