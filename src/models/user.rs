// src/models/user.rs
// DOCUMENTATION: Users, customers (clients) and authentication payloads
// PURPOSE: Shapes exchanged with /auth and /clients

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{format_date, status_label};

/// Dashboard role carried by every signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Agent,
    Marketer,
    Customer,
}

impl Role {
    /// Parse the role string stored in the session
    /// DOCUMENTATION: The API has used "partner" for marketers and
    /// "client"/"user" for customers; both spellings are accepted.
    pub fn parse(value: &str) -> Option<Role> {
        match value.trim().to_lowercase().as_str() {
            "admin" | "super_admin" => Some(Role::Admin),
            "agent" => Some(Role::Agent),
            "marketer" | "partner" => Some(Role::Marketer),
            "customer" | "client" | "user" => Some(Role::Customer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Agent => "agent",
            Role::Marketer => "marketer",
            Role::Customer => "customer",
        }
    }

    /// Canonical dashboard path for the role
    pub fn dashboard_prefix(&self) -> &'static str {
        match self {
            Role::Admin => "/dashboard/admin",
            Role::Agent => "/dashboard/agent",
            Role::Marketer => "/dashboard/marketer",
            Role::Customer => "/dashboard/customer",
        }
    }
}

/// User record as returned by /auth/me and embedded in /clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub avatar: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub favorites_count: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Table row for the admin clients page
#[derive(Debug, Clone, Serialize)]
pub struct ClientRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: String,
    pub status_label: &'static str,
    pub favorites_count: i64,
    pub joined_at: Option<String>,
}

impl User {
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(Role::parse)
    }

    pub fn to_row(&self) -> ClientRow {
        let status = self.status.clone().unwrap_or_else(|| "active".to_string());
        ClientRow {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone().unwrap_or_default(),
            phone: self.phone.clone().unwrap_or_default(),
            status_label: status_label(&status),
            status,
            favorites_count: self.favorites_count.unwrap_or(0),
            joined_at: format_date(self.created_at),
        }
    }
}

/// Admin form: edit a client's profile, only provided fields are sent
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateClientRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 120))]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 8, max = 20))]
    pub phone: Option<String>,
}

/// Sign-in form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInRequest {
    /// Email address or phone number
    #[validate(length(min = 3, max = 255))]
    pub login: String,

    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

/// Customer sign-up form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "passwords_match"))]
pub struct SignUpRequest {
    #[validate(length(min = 2, max = 120))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 20))]
    pub phone: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    pub password_confirmation: String,
}

fn passwords_match(req: &SignUpRequest) -> Result<(), validator::ValidationError> {
    if req.password != req.password_confirmation {
        return Err(validator::ValidationError::new("password_mismatch"));
    }
    Ok(())
}

/// Answer of /auth/login and /auth/register
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(alias = "access_token")]
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_role_aliases() {
        assert_eq!(Role::parse("Partner"), Some(Role::Marketer));
        assert_eq!(Role::parse("client"), Some(Role::Customer));
        assert_eq!(Role::parse(" admin "), Some(Role::Admin));
        assert_eq!(Role::parse("guest"), None);
    }

    #[test]
    fn sign_up_requires_matching_passwords() {
        let req = SignUpRequest {
            name: "سارة".to_string(),
            email: "sara@example.com".to_string(),
            phone: "0551234567".to_string(),
            password: "secret-pass".to_string(),
            password_confirmation: "other-pass".to_string(),
        };
        assert!(req.validate().is_err());

        let ok = SignUpRequest {
            password_confirmation: "secret-pass".to_string(),
            ..req
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn client_row_defaults_missing_fields() {
        let user: User = serde_json::from_str(r#"{"id":7,"name":"خالد"}"#).unwrap();
        let row = user.to_row();
        assert_eq!(row.status, "active");
        assert_eq!(row.status_label, "نشط");
        assert_eq!(row.email, "");
    }
}
