use chrono::NaiveDate;
use serde::Serialize;

/// Private and bank details, 1:1 with a user. Materialized lazily: the
/// get-or-default accessor returns a zeroed record when no row exists and
/// the row is only persisted on first write.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileDetails {
    pub id: i64,
    pub user_id: i64,

    // Private information
    pub date_of_birth: Option<NaiveDate>,
    pub residential_address: Option<String>,
    pub nationality: Option<String>,
    pub personal_email: Option<String>,
    pub gender: Option<String>,
    pub marital_status: Option<String>,

    // Bank information
    pub account_number: Option<String>,
    pub bank_name: Option<String>,
    pub ifsc_code: Option<String>,
    pub pan_number: Option<String>,
    pub uan_number: Option<String>,
    pub employee_code: Option<String>,

    pub created_at: String,
    pub updated_at: String,
}

impl ProfileDetails {
    pub fn default_for(user_id: i64) -> Self {
        let now = chrono::Local::now().to_rfc3339();
        Self {
            user_id,
            created_at: now.clone(),
            updated_at: now,
            ..Default::default()
        }
    }

    /// True when the record only exists in memory (never written).
    pub fn is_unsaved(&self) -> bool {
        self.id == 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserSkill {
    pub id: i64,
    pub user_id: i64,
    pub skill_name: String,
    pub proficiency_level: Option<String>, // Beginner / Intermediate / Advanced / Expert
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserCertification {
    pub id: i64,
    pub user_id: i64,
    pub certification_name: String,
    pub issuing_organization: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub credential_id: Option<String>,
    pub created_at: String,
}
