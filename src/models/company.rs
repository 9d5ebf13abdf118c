use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Company {
    pub id: i64,
    pub name: String,       // ⇔ companies.name
    pub code: String,       // ⇔ companies.code (UNIQUE, max 2 chars in practice)
    pub logo: Option<String>, // ⇔ companies.logo (file-storage reference)
    pub created_at: String, // ⇔ companies.created_at (TEXT, ISO8601)
}

impl Company {
    /// Derive the company code the way registration does: first two
    /// characters of the name, uppercased.
    pub fn code_from_name(name: &str) -> String {
        name.chars().take(2).collect::<String>().to_uppercase()
    }
}
