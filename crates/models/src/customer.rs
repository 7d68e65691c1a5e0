use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub age: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert a row; the database assigns `id`.
pub async fn create(db: &DatabaseConnection, name: &str, email: &str, age: i32) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        age: Set(age),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Rewrite every column of an existing row. Absent arguments keep the stored value.
pub async fn overwrite(
    db: &DatabaseConnection,
    id: i32,
    name: Option<&str>,
    email: Option<&str>,
    age: Option<i32>,
) -> Result<Model, errors::ModelError> {
    let current = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| errors::ModelError::NotFound(format!("customer {id} not found")))?;
    let am = ActiveModel {
        id: Set(current.id),
        name: Set(name.map(str::to_string).unwrap_or(current.name)),
        email: Set(email.map(str::to_string).unwrap_or(current.email)),
        age: Set(age.unwrap_or(current.age)),
    };
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn hard_delete(db: &DatabaseConnection, id: i32) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}
