//! Fixtures shared by unit and router tests.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::core::database::run_migrations;
use crate::features::auth::models::{Customer, Technician};
use crate::features::auth::services::password::hash_password;

/// Fresh in-memory database with the schema applied.
///
/// A single connection keeps every query on the same in-memory database.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    run_migrations(&pool).await.unwrap();
    pool
}

pub async fn seed_customer(pool: &SqlitePool, email: &str, password: &str) -> Customer {
    let password_hash = hash_password(password).unwrap();

    let result = sqlx::query(
        r#"
        INSERT INTO customers (firstname, lastname, email, phones, address, password_hash)
        VALUES ('Test', 'Customer', ?, '555-0100', '1 Test Street', ?)
        "#,
    )
    .bind(email)
    .bind(&password_hash)
    .execute(pool)
    .await
    .unwrap();

    Customer {
        id: result.last_insert_rowid(),
        first_name: "Test".to_string(),
        last_name: "Customer".to_string(),
        email: email.to_string(),
        phones: "555-0100".to_string(),
        address: "1 Test Street".to_string(),
        password_hash,
    }
}

pub async fn seed_technician(pool: &SqlitePool, email: &str, password: &str) -> Technician {
    let password_hash = hash_password(password).unwrap();

    let result = sqlx::query("INSERT INTO technicians (email, password_hash) VALUES (?, ?)")
        .bind(email)
        .bind(&password_hash)
        .execute(pool)
        .await
        .unwrap();

    Technician {
        id: result.last_insert_rowid(),
        email: email.to_string(),
        password_hash,
    }
}

pub async fn seed_item(pool: &SqlitePool, name: &str, quantity: i64) -> i64 {
    sqlx::query("INSERT INTO inventory (itemname, quantity) VALUES (?, ?)")
        .bind(name)
        .bind(quantity)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
}

/// Insert a request directly, bypassing technician selection.
pub async fn seed_request(
    pool: &SqlitePool,
    customer_id: i64,
    technician_id: Option<i64>,
    status: &str,
) -> i64 {
    sqlx::query(
        r#"
        INSERT INTO servicerequests (requestdate, description, status, customerid, technicianid)
        VALUES ('2024-03-01', 'Seeded request', ?, ?, ?)
        "#,
    )
    .bind(status)
    .bind(customer_id)
    .bind(technician_id)
    .execute(pool)
    .await
    .unwrap()
    .last_insert_rowid()
}
