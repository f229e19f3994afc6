use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};
use uuid::Uuid;

use crate::errors::RepositoryError;
use crate::users::domain::User;
use crate::users::repository::UserRepository;

/// SeaORM-backed user repository.
pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn map_db_err(err: DbErr) -> RepositoryError {
    match &err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
            RepositoryError::Unavailable(err.to_string())
        }
        _ => RepositoryError::Db(err.to_string()),
    }
}

fn to_domain(model: models::user::Model) -> User {
    User { id: model.id, full_name: model.full_name }
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn get_all(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = models::user::Entity::find().all(&self.db).await.map_err(map_db_err)?;
        Ok(rows.into_iter().map(to_domain).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let row = models::user::Entity::find_by_id(id).one(&self.db).await.map_err(map_db_err)?;
        Ok(row.map(to_domain))
    }

    async fn create(&self, user: User) -> Result<Option<User>, RepositoryError> {
        let id = if user.id.is_nil() { Uuid::new_v4() } else { user.id };
        let am = models::user::ActiveModel { id: Set(id), full_name: Set(user.full_name) };
        let created = am.insert(&self.db).await.map_err(map_db_err)?;
        Ok(Some(to_domain(created)))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let res =
            models::user::Entity::delete_by_id(id).exec(&self.db).await.map_err(map_db_err)?;
        Ok(res.rows_affected > 0)
    }
}
