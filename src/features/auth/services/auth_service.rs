use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{CustomerSignupFormDto, LoginFormDto};
use crate::features::auth::model::{AuthenticatedUser, UserRole};
use crate::features::auth::models::{Customer, Technician};
use crate::features::auth::services::password::{
    hash_password_blocking, verify_password_blocking,
};
use crate::features::auth::services::session_service::SessionService;
use crate::shared::constants::MSG_EMAIL_TAKEN;

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

/// Service for authentication operations (signup, login, logout)
pub struct AuthService {
    pool: SqlitePool,
    sessions: Arc<SessionService>,
}

impl AuthService {
    pub fn new(pool: SqlitePool, sessions: Arc<SessionService>) -> Self {
        Self { pool, sessions }
    }

    pub fn sessions(&self) -> &SessionService {
        &self.sessions
    }

    async fn find_customer_by_email(&self, email: &str) -> Result<Option<Customer>> {
        sqlx::query_as::<_, Customer>(
            r#"
            SELECT customerid, firstname, lastname, email, phones, address, password_hash
            FROM customers
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to find customer by email: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_technician_by_email(&self, email: &str) -> Result<Option<Technician>> {
        sqlx::query_as::<_, Technician>(
            r#"
            SELECT technicianid, email, password_hash
            FROM technicians
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to find technician by email: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Verify credentials against the customer table, then the technician
    /// table. The first table with a matching email and password wins.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<AuthenticatedUser>> {
        if let Some(customer) = self.find_customer_by_email(email).await? {
            if verify_password_blocking(password.to_string(), customer.password_hash).await? {
                return Ok(Some(AuthenticatedUser {
                    user_id: customer.id,
                    role: UserRole::Customer,
                    email: customer.email,
                }));
            }
        }

        if let Some(technician) = self.find_technician_by_email(email).await? {
            if verify_password_blocking(password.to_string(), technician.password_hash).await? {
                return Ok(Some(AuthenticatedUser {
                    user_id: technician.id,
                    role: UserRole::Technician,
                    email: technician.email,
                }));
            }
        }

        Ok(None)
    }

    /// Authenticate and open a session.
    ///
    /// Returns the identity together with the new session token, or `None`
    /// when the credentials do not match.
    pub async fn login(&self, dto: LoginFormDto) -> Result<Option<(AuthenticatedUser, String)>> {
        let Some(user) = self.authenticate(&dto.email, &dto.password).await? else {
            tracing::info!("Login failed for email={}", dto.email);
            return Ok(None);
        };

        let token = self.sessions.create(user.role, user.user_id).await?;
        tracing::info!(
            "Login successful: role={}, user_id={}",
            user.role,
            user.user_id
        );

        Ok(Some((user, token)))
    }

    /// End the session behind `token`.
    pub async fn logout(&self, token: &str) -> Result<()> {
        self.sessions.revoke(token).await
    }

    /// Register a new customer.
    ///
    /// Fails with `Conflict` when the email is already registered.
    pub async fn register_customer(&self, dto: CustomerSignupFormDto) -> Result<Customer> {
        if self.find_customer_by_email(&dto.email).await?.is_some() {
            return Err(AppError::Conflict(MSG_EMAIL_TAKEN.to_string()));
        }

        let password_hash = hash_password_blocking(dto.password.clone()).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO customers (firstname, lastname, email, phones, address, password_hash)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&dto.firstname)
        .bind(&dto.lastname)
        .bind(&dto.email)
        .bind(&dto.phones)
        .bind(&dto.address)
        .bind(&password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::Conflict(MSG_EMAIL_TAKEN.to_string());
            }
            tracing::error!("Failed to create customer: {:?}", e);
            AppError::Database(e)
        })?;

        let customer = Customer {
            id: result.last_insert_rowid(),
            first_name: dto.firstname,
            last_name: dto.lastname,
            email: dto.email,
            phones: dto.phones,
            address: dto.address,
            password_hash,
        };

        tracing::info!(
            "Customer registered: id={}, email={}",
            customer.id,
            customer.email
        );

        Ok(customer)
    }

    /// Provision a technician account.
    ///
    /// Fails with `Conflict` when the email is already in use.
    pub async fn create_technician(&self, email: &str, password: &str) -> Result<Technician> {
        let password_hash = hash_password_blocking(password.to_string()).await?;

        let result = sqlx::query("INSERT INTO technicians (email, password_hash) VALUES (?, ?)")
            .bind(email)
            .bind(&password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    return AppError::Conflict(format!("Technician '{}' already exists", email));
                }
                tracing::error!("Failed to create technician: {:?}", e);
                AppError::Database(e)
            })?;

        let technician = Technician {
            id: result.last_insert_rowid(),
            email: email.to_string(),
            password_hash,
        };

        tracing::info!(
            "Technician created: id={}, email={}",
            technician.id,
            technician.email
        );

        Ok(technician)
    }
}
