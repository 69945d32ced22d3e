use serde::{Deserialize, Deserializer, Serialize};

use crate::format::clamp_percentage;

// -- Request bodies --

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateApplicationRequest {
    pub visa_type: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateFormRequest {
    pub session_id: String,
}

// -- Auth --

/// Profile object returned by the auth endpoints.
///
/// Only the fields the UI displays are typed; everything else is kept in
/// `extra` so the stored copy matches what the backend sent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct User {
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl User {
    /// First name when known, otherwise the email address.
    pub fn display_name(&self) -> String {
        match self.first_name.as_deref().map(str::trim) {
            Some(first) if !first.is_empty() => first.to_string(),
            _ => self.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Error body shape used by the backend (`{"detail": ...}`).
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Human-readable text from `detail`.
    ///
    /// A plain string is returned as is. Validation failures arrive as a list
    /// of `{"msg": ...}` objects, whose messages are joined.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .filter_map(|item| match item {
                        serde_json::Value::String(s) => Some(s.clone()),
                        other => other.get("msg").and_then(|m| m.as_str()).map(str::to_string),
                    })
                    .collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join("; "))
                }
            }
            _ => None,
        }
    }
}

// -- Applications --

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Application {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub visa_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "optional_id_string")]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "optional_percentage")]
    pub completion_percentage: Option<u8>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Application {
    /// Session backing this application. Falls back to the application id
    /// for backends that key both records the same way.
    pub fn session_key(&self) -> &str {
        self.session_id.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplicationEnvelope {
    pub application: Application,
}

/// `GET /api/applications` answers either a bare list or `{applications: [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApplicationList {
    Wrapped { applications: Vec<Application> },
    Bare(Vec<Application>),
}

impl ApplicationList {
    pub fn into_vec(self) -> Vec<Application> {
        match self {
            ApplicationList::Wrapped { applications } => applications,
            ApplicationList::Bare(applications) => applications,
        }
    }
}

// -- Owl agent --

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneratedForm {
    #[serde(deserialize_with = "id_string")]
    pub form_id: String,
    #[serde(default)]
    pub visa_type: String,
    #[serde(default)]
    pub form_type: String,
    #[serde(default, deserialize_with = "percentage")]
    pub completion_percentage: u8,
    #[serde(default)]
    pub generated_at: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateFormResponse {
    pub form: GeneratedForm,
}

// -- Serde helpers --

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
        }
    }
}

/// Identifiers come back as strings from some endpoints and integers from others.
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

pub(crate) fn optional_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

pub(crate) fn percentage<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?
        .map(clamp_percentage)
        .unwrap_or(0))
}

pub(crate) fn optional_percentage<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.map(clamp_percentage))
}
