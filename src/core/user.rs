//! User business logic - registration, lookup, and settings updates.
//!
//! The allocation validator is the gate in front of every persisted settings
//! change: an allocation that does not sum to 100 is rejected before anything
//! touches the database, mirroring the client-side check the settings form
//! performs.

use crate::{
    core::{allocation::AllocationConfig, auth},
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

/// Registers a new user with a hashed password and validated settings.
///
/// # Errors
/// * [`Error::InvalidSalary`] - negative or non-finite salary
/// * [`Error::InvalidAllocation`] - allocation does not sum to 100
/// * [`Error::DuplicateEmail`] - email already registered
pub async fn create_user(
    db: &DatabaseConnection,
    email: String,
    display_name: String,
    password: &str,
    salary: f64,
    allocation: AllocationConfig,
) -> Result<user::Model> {
    if salary < 0.0 || !salary.is_finite() {
        return Err(Error::InvalidSalary { salary });
    }
    allocation.validate()?;

    let email = email.trim().to_lowercase();
    if get_user_by_email(db, &email).await?.is_some() {
        return Err(Error::DuplicateEmail { email });
    }

    let password_hash = auth::hash_password(password)?;

    let model = user::ActiveModel {
        email: Set(email),
        display_name: Set(display_name.trim().to_string()),
        password_hash: Set(password_hash),
        salary: Set(salary),
        needs_pct: Set(i32::try_from(allocation.needs).unwrap_or(0)),
        wants_pct: Set(i32::try_from(allocation.wants).unwrap_or(0)),
        savings_pct: Set(i32::try_from(allocation.savings).unwrap_or(0)),
        investments_pct: Set(i32::try_from(allocation.investments).unwrap_or(0)),
        emergency_pct: Set(i32::try_from(allocation.emergency).unwrap_or(0)),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Finds a user by id.
pub async fn get_user_by_id(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Finds a user by email (lowercased at registration time).
pub async fn get_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Replaces a user's budget settings wholesale.
///
/// The allocation is validated before any write; salary is optional and keeps
/// its current value when absent. Partial patching of individual buckets is
/// deliberately not supported.
pub async fn update_settings(
    db: &DatabaseConnection,
    user_id: i64,
    salary: Option<f64>,
    allocation: AllocationConfig,
) -> Result<user::Model> {
    allocation.validate()?;
    if let Some(salary) = salary
        && (salary < 0.0 || !salary.is_finite())
    {
        return Err(Error::InvalidSalary { salary });
    }

    let user = get_user_by_id(db, user_id)
        .await?
        .ok_or_else(|| Error::UserNotFound {
            identifier: user_id.to_string(),
        })?;

    let mut active_model: user::ActiveModel = user.into();
    if let Some(salary) = salary {
        active_model.salary = Set(salary);
    }
    active_model.needs_pct = Set(i32::try_from(allocation.needs).unwrap_or(0));
    active_model.wants_pct = Set(i32::try_from(allocation.wants).unwrap_or(0));
    active_model.savings_pct = Set(i32::try_from(allocation.savings).unwrap_or(0));
    active_model.investments_pct = Set(i32::try_from(allocation.investments).unwrap_or(0));
    active_model.emergency_pct = Set(i32::try_from(allocation.emergency).unwrap_or(0));

    active_model.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_user_defaults() -> Result<()> {
        let db = setup_test_db().await?;

        let user = create_user(
            &db,
            "Pat@Example.com".to_string(),
            "Pat".to_string(),
            "hunter2-long-enough",
            60000.0,
            AllocationConfig::default(),
        )
        .await?;

        // Email is normalized at registration
        assert_eq!(user.email, "pat@example.com");
        assert_eq!(user.salary, 60000.0);
        assert_eq!(AllocationConfig::from_user(&user), AllocationConfig::default());
        // Hash is stored, never the password
        assert_ne!(user.password_hash, "hunter2-long-enough");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicate_email() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_user(&db, "pat@example.com").await?;

        let result = create_user(
            &db,
            "pat@example.com".to_string(),
            "Other Pat".to_string(),
            "password123",
            100.0,
            AllocationConfig::default(),
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::DuplicateEmail { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_user_rejects_negative_salary() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_user(
            &db,
            "pat@example.com".to_string(),
            "Pat".to_string(),
            "password123",
            -500.0,
            AllocationConfig::default(),
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidSalary { salary } if salary == -500.0
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_user_rejects_invalid_allocation() -> Result<()> {
        let db = setup_test_db().await?;

        let allocation = AllocationConfig {
            needs: 50,
            wants: 20,
            savings: 20,
            investments: 5,
            emergency: 4,
        };
        let result = create_user(
            &db,
            "pat@example.com".to_string(),
            "Pat".to_string(),
            "password123",
            100.0,
            allocation,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidAllocation { total: 99 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_settings_replaces_wholesale() -> Result<()> {
        let (db, user) = setup_with_user().await?;

        let new_allocation = AllocationConfig {
            needs: 40,
            wants: 30,
            savings: 15,
            investments: 10,
            emergency: 5,
        };
        let updated = update_settings(&db, user.id, Some(75000.0), new_allocation).await?;

        assert_eq!(updated.salary, 75000.0);
        assert_eq!(AllocationConfig::from_user(&updated), new_allocation);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_settings_keeps_salary_when_absent() -> Result<()> {
        let (db, user) = setup_with_user().await?;
        let original_salary = user.salary;

        let updated = update_settings(&db, user.id, None, AllocationConfig::default()).await?;
        assert_eq!(updated.salary, original_salary);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_settings_gate_blocks_invalid_allocation() -> Result<()> {
        let (db, user) = setup_with_user().await?;
        let before = AllocationConfig::from_user(&user);

        let bad = AllocationConfig {
            needs: 90,
            wants: 20,
            savings: 20,
            investments: 5,
            emergency: 5,
        };
        let result = update_settings(&db, user.id, Some(1.0), bad).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidAllocation { total: 140 }
        ));

        // Nothing persisted
        let stored = get_user_by_id(&db, user.id).await?.unwrap();
        assert_eq!(AllocationConfig::from_user(&stored), before);
        assert_eq!(stored.salary, user.salary);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_settings_unknown_user() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_settings(&db, 999, None, AllocationConfig::default()).await;
        assert!(matches!(result.unwrap_err(), Error::UserNotFound { .. }));

        Ok(())
    }
}
