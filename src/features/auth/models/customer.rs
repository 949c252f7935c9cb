use sqlx::FromRow;

/// Database model for customer
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Customer {
    #[sqlx(rename = "customerid")]
    pub id: i64,
    #[sqlx(rename = "firstname")]
    pub first_name: String,
    #[sqlx(rename = "lastname")]
    pub last_name: String,
    pub email: String,
    pub phones: String,
    pub address: String,
    pub password_hash: String,
}
