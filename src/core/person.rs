//! Person business logic - Technicians and other movement participants.

use crate::{
    entities::{Person, person},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Creates an active person with the given role.
pub async fn create_person(
    db: &DatabaseConnection,
    first_name: String,
    last_name: String,
    role: String,
) -> Result<person::Model> {
    if first_name.trim().is_empty() && last_name.trim().is_empty() {
        return Err(Error::Config {
            message: "Person name cannot be empty".to_string(),
        });
    }
    if role.trim().is_empty() {
        return Err(Error::Config {
            message: "Person role cannot be empty".to_string(),
        });
    }

    person::ActiveModel {
        first_name: Set(first_name.trim().to_string()),
        last_name: Set(last_name.trim().to_string()),
        role: Set(role.trim().to_lowercase()),
        email: Set(None),
        active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Finds a person by ID.
pub async fn get_person_by_id<C>(db: &C, person_id: i64) -> Result<Option<person::Model>>
where
    C: ConnectionTrait,
{
    Person::find_by_id(person_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a person by ID, failing with `PersonNotFound` if absent.
pub async fn require_person<C>(db: &C, person_id: i64) -> Result<person::Model>
where
    C: ConnectionTrait,
{
    get_person_by_id(db, person_id)
        .await?
        .ok_or(Error::PersonNotFound { person_id })
}

/// Active technicians, ordered by last then first name.
pub async fn list_technicians(db: &DatabaseConnection) -> Result<Vec<person::Model>> {
    Person::find()
        .filter(person::Column::Role.eq(person::TECHNICIAN_ROLE))
        .filter(person::Column::Active.eq(true))
        .order_by_asc(person::Column::LastName)
        .order_by_asc(person::Column::FirstName)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Marks a person inactive; their history and stock rows are kept.
pub async fn deactivate_person(db: &DatabaseConnection, person_id: i64) -> Result<person::Model> {
    let mut person: person::ActiveModel = require_person(db, person_id).await?.into();
    person.active = Set(false);
    person.update(db).await.map_err(Into::into)
}
