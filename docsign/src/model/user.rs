//! User records and session identity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Guest,
    ClubMember,
    Organizer,
    Manager,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::ClubMember => "club_member",
            Self::Organizer => "organizer",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "guest" => Ok(Self::Guest),
            "club_member" => Ok(Self::ClubMember),
            "organizer" => Ok(Self::Organizer),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserPosition {
    President,
    Member,
}

impl FromStr for UserPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "president" => Ok(Self::President),
            "member" => Ok(Self::Member),
            other => Err(format!("unknown position '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub position: Option<UserPosition>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

/// Body for `POST /user`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub role: UserRole,
    pub position: UserPosition,
}

/// The signed-in user as reported by `/auth/me`.
///
/// Every field is optional; missing values come back as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

/// Envelope returned by `/auth/me`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SessionEnvelope {
    #[serde(default)]
    pub user: Option<SessionUser>,
}

/// Per-role user counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCounts {
    #[serde(default)]
    pub admin: u64,
    #[serde(default)]
    pub manager: u64,
    #[serde(default)]
    pub organizer: u64,
    #[serde(default)]
    pub club_member: u64,
    #[serde(default)]
    pub guest: u64,
}

/// Response of `/user/count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCount {
    #[serde(default)]
    pub role: RoleCounts,
    #[serde(default)]
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_deserializes() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "name": "Ann",
            "email": "ann@example.com",
            "phoneNumber": null,
            "role": "club_member",
            "position": null,
            "createdAt": "2025-01-01T00:00:00.000Z",
            "updatedAt": null,
            "deletedAt": null
        }))
        .unwrap();

        assert_eq!(user.role, UserRole::ClubMember);
        assert!(user.position.is_none());
    }

    #[test]
    fn test_new_user_omits_missing_phone() {
        let body = serde_json::to_value(NewUser {
            email: "a@b.c".to_string(),
            name: "A".to_string(),
            phone_number: None,
            role: UserRole::Organizer,
            position: UserPosition::President,
        })
        .unwrap();

        assert_eq!(
            body,
            json!({"email": "a@b.c", "name": "A", "role": "organizer", "position": "president"})
        );
    }

    #[test]
    fn test_session_envelope_missing_fields() {
        let envelope: SessionEnvelope =
            serde_json::from_value(json!({"user": {"email": "a@b.c"}})).unwrap();
        let user = envelope.user.unwrap();
        assert_eq!(user.email.as_deref(), Some("a@b.c"));
        assert!(user.name.is_none());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("club-member".parse::<UserRole>(), Ok(UserRole::ClubMember));
        assert_eq!(UserRole::ClubMember.to_string(), "club_member");
        assert!("owner".parse::<UserRole>().is_err());
    }
}
