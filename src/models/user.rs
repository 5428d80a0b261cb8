use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

pub const DEFAULT_ROLE: &str = "user";
/// Progress assigned to a freshly registered user, before any profile edit.
pub const BASELINE_PROGRESS: u32 = 10;

/// Document of the "users" collection
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_id_as_hex",
        default
    )]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub stats: ApplicationStats,
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub applications: Vec<Value>,
    #[serde(default)]
    pub profile: Profile,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<String>,
}

impl User {
    /// New user as stored by registration: empty profile, zeroed stats.
    pub fn new(name: String, email: String, avatar: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: None,
            name,
            email,
            avatar,
            role: default_role(),
            progress: BASELINE_PROGRESS,
            stats: ApplicationStats::default(),
            applications: Vec::new(),
            profile: Profile::default(),
            created_at: Some(now.clone()),
            updated_at: Some(now),
        }
    }
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

/// `_id` goes out as a plain hex string; inserts never carry an id.
fn serialize_id_as_hex<S>(id: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id {
        Some(oid) => serializer.serialize_str(&oid.to_hex()),
        None => serializer.serialize_none(),
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStats {
    #[serde(default)]
    pub applied: u32,
    #[serde(default)]
    pub in_progress: u32,
    #[serde(default)]
    pub interviews: u32,
    #[serde(default)]
    pub offers: u32,
    #[serde(default)]
    pub rejected: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub experience: Vec<Value>,
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub education: Vec<Value>,
    #[serde(default)]
    pub job_preferences: JobPreferences,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[schema(value_type = Option<Object>)]
    pub career_info: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[schema(value_type = Option<Object>)]
    pub projects: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobPreferences {
    #[serde(default)]
    pub job_types: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub salary: Salary,
    #[serde(default)]
    pub remote: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, utoipa::ToSchema)]
pub struct Salary {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_user_has_baseline_and_empty_collections() {
        let user = User::new("Ada".into(), "ada@x.com".into(), String::new());
        assert_eq!(user.progress, BASELINE_PROGRESS);
        assert_eq!(user.role, "user");
        assert!(user.profile.skills.is_empty());
        assert!(user.applications.is_empty());
        assert_eq!(user.stats, ApplicationStats::default());
    }

    #[test]
    fn stored_shape_uses_camel_case_and_null_placeholders() {
        let user = User::new("Ada".into(), "ada@x.com".into(), String::new());
        let value = serde_json::to_value(&user).unwrap();

        assert!(value.get("_id").is_none());
        assert_eq!(value["stats"]["inProgress"], 0);
        assert_eq!(value["profile"]["headline"], Value::Null);
        assert_eq!(value["profile"]["jobPreferences"]["salary"]["min"], Value::Null);
        assert_eq!(value["profile"]["jobPreferences"]["jobTypes"], json!([]));
        assert!(value["profile"].get("careerInfo").is_none());
    }

    #[test]
    fn id_is_rendered_as_hex() {
        let mut user = User::new("Ada".into(), "ada@x.com".into(), String::new());
        let oid = ObjectId::new();
        user.id = Some(oid);
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["_id"], json!(oid.to_hex()));
    }

    #[test]
    fn partial_profile_payload_fills_defaults() {
        let profile: Profile = serde_json::from_value(json!({
            "headline": "Engineer",
            "skills": ["Go"],
            "bio": null
        }))
        .unwrap();

        assert_eq!(profile.headline.as_deref(), Some("Engineer"));
        assert_eq!(profile.bio, None);
        assert!(profile.experience.is_empty());
        assert_eq!(profile.job_preferences, JobPreferences::default());
    }
}
