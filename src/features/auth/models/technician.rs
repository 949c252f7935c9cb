use sqlx::FromRow;

/// Database model for technician
#[derive(Debug, Clone, FromRow)]
pub struct Technician {
    #[sqlx(rename = "technicianid")]
    pub id: i64,
    pub email: String,
    pub password_hash: String,
}
