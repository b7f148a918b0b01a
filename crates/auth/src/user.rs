//! User records, keyed by email.
//!
//! Records are created and updated through an upsert with set-semantics: only
//! the fields present in a [`UserPatch`] overwrite what is stored. There is no
//! deletion path.

use serde::{Deserialize, Serialize};

use storefront_core::Entity;

use crate::Role;

/// Stored user document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Unique key.
    pub email: String,

    #[serde(default, skip_serializing_if = "Role::is_none")]
    pub role: Role,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

/// Body of an upsert: every field optional, absent fields are left untouched.
///
/// `role` is accepted here as well, so any caller can set their own role.
/// That is current behavior and is kept observable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub role: Option<Role>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub education: Option<String>,
    pub linkedin: Option<String>,
}

impl UserRecord {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }

    /// Record created by an upsert that matched nothing.
    pub fn from_patch(email: impl Into<String>, patch: &UserPatch) -> Self {
        let mut record = Self::new(email);
        record.apply(patch);
        record
    }

    /// Overwrite the fields present in `patch`.
    ///
    /// Returns whether any stored value changed.
    pub fn apply(&mut self, patch: &UserPatch) -> bool {
        let mut changed = false;

        if let Some(role) = patch.role {
            changed |= self.set_role(role);
        }
        changed |= set_field(&mut self.name, &patch.name);
        changed |= set_field(&mut self.image, &patch.image);
        changed |= set_field(&mut self.phone, &patch.phone);
        changed |= set_field(&mut self.location, &patch.location);
        changed |= set_field(&mut self.education, &patch.education);
        changed |= set_field(&mut self.linkedin, &patch.linkedin);

        changed
    }

    /// Returns whether the role changed.
    pub fn set_role(&mut self, role: Role) -> bool {
        if self.role == role {
            return false;
        }
        self.role = role;
        true
    }
}

impl Entity for UserRecord {
    type Id = String;

    fn id(&self) -> String {
        self.email.clone()
    }
}

fn set_field(slot: &mut Option<String>, value: &Option<String>) -> bool {
    match value {
        Some(v) if slot.as_deref() != Some(v.as_str()) => {
            *slot = Some(v.clone());
            true
        }
        _ => false,
    }
}
