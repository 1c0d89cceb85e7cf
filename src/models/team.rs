//! Team model.

use super::user::User;
use serde::{Deserialize, Serialize};

/// A team member as it appears on a roster.
///
/// The team is implied by the enclosing [`Team`], so no `team_name` here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

impl TeamMember {
    /// The user record this member becomes once placed in `team_name`.
    pub fn into_user(self, team_name: &str) -> User {
        User {
            id: self.user_id,
            name: self.username,
            team_name: Some(team_name.to_string()),
            is_active: self.is_active,
        }
    }
}

impl From<User> for TeamMember {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.name,
            is_active: user.is_active,
        }
    }
}

/// A team and its live roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub team_name: String,
    pub members: Vec<TeamMember>,
}
