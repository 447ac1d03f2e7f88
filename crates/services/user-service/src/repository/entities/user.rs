//! User database entity for SeaORM.
//!
//! Personal details are embedded as nullable columns. An embedded composite
//! whose columns are all NULL loads as `None`.

use chrono::FixedOffset;
use sea_orm::entity::prelude::*;
use sea_orm::Set;

use common::{AppError, AppResult};
use domain::{HumanName, PersonalDetails, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// JSON array of strings
    pub middle_names: Option<Json>,
    pub date_of_birth: Option<DateTimeWithTimeZone>,
    /// UTC offset of `date_of_birth` in seconds; timestamptz drops it
    pub date_of_birth_offset: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl TryFrom<Model> for User {
    type Error = AppError;

    fn try_from(model: Model) -> AppResult<Self> {
        let middle_names = model
            .middle_names
            .map(serde_json::from_value::<Vec<String>>)
            .transpose()
            .map_err(|e| {
                AppError::internal(format!("Corrupt middle_names for user {}: {}", model.id, e))
            })?;

        let date_of_birth = match (model.date_of_birth, model.date_of_birth_offset) {
            (Some(instant), Some(offset)) => {
                let offset = FixedOffset::east_opt(offset).ok_or_else(|| {
                    AppError::internal(format!(
                        "Corrupt date_of_birth_offset for user {}: {}",
                        model.id, offset
                    ))
                })?;
                Some(instant.with_timezone(&offset))
            }
            (instant, _) => instant,
        };

        let name = HumanName {
            first_name: model.first_name,
            last_name: model.last_name,
            middle_names,
        };
        let name = (!name.is_empty()).then_some(name);

        let personal_details = PersonalDetails::new(name, date_of_birth);
        let personal_details = (!personal_details.is_empty()).then_some(personal_details);

        Ok(User {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            personal_details,
        })
    }
}

/// Convert domain entity to a fully set active model
impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        let details = user.personal_details.as_ref();
        let name = details.and_then(|d| d.name.as_ref());
        let date_of_birth = details.and_then(|d| d.date_of_birth);

        ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            first_name: Set(name.and_then(|n| n.first_name.clone())),
            last_name: Set(name.and_then(|n| n.last_name.clone())),
            middle_names: Set(name.and_then(|n| n.middle_names.clone()).map(Json::from)),
            date_of_birth: Set(date_of_birth),
            date_of_birth_offset: Set(date_of_birth.map(|d| d.offset().local_minus_utc())),
        }
    }
}
