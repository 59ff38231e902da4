//! Session entity - Maps opaque bearer tokens to users.
//!
//! Tokens are random UUIDs issued at login and revoked at logout. The token is
//! the primary key; lookups during request authentication are by token.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Session database model - one row per issued bearer token
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    /// Opaque bearer token (UUID v4, stored as its string form)
    #[sea_orm(primary_key, auto_increment = false)]
    pub token: String,
    /// ID of the user this session belongs to
    pub user_id: i64,
    /// When the token was issued
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Session and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each session belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
