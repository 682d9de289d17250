//! Context supplied by the hosting runtime.
//!
//! The core never authenticates on its own; the host hands over who the
//! user is and which record (if any) is selected.

use serde::{Deserialize, Serialize};

use crate::secrets::Scope;

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    /// User identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// Everything the host provides at mount time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostContext {
    /// The signed-in user.
    pub user: UserContext,
    /// Selected business record, if the host has one in view.
    #[serde(default)]
    pub object_id: Option<String>,
}

impl HostContext {
    /// Creates a context for `user_id`/`user_name` with no selection.
    pub fn new(user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            user: UserContext {
                id: user_id.into(),
                name: user_name.into(),
            },
            object_id: None,
        }
    }

    /// Sets the selected record.
    pub fn with_object(mut self, object_id: impl Into<String>) -> Self {
        self.object_id = Some(object_id.into());
        self
    }

    /// Secret scope of the signed-in user.
    pub fn user_scope(&self) -> Scope {
        Scope::user(self.user.id.clone())
    }

    /// Greeting shown in the view title.
    pub fn greeting(&self) -> String {
        format!("Hi, {}", self.user.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_scope() {
        let ctx = HostContext::new("usr_42", "Ada");
        assert_eq!(ctx.user_scope(), Scope::user("usr_42"));
        assert_eq!(ctx.greeting(), "Hi, Ada");
        assert!(ctx.object_id.is_none());
    }

    #[test]
    fn test_with_object() {
        let ctx = HostContext::new("usr_42", "Ada").with_object("prod_1");
        assert_eq!(ctx.object_id.as_deref(), Some("prod_1"));
    }
}
