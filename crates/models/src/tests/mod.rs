use crate::user;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

/// In-memory SQLite with the schema applied. Pool is capped at one
/// connection because every new `sqlite::memory:` connection starts empty.
async fn sqlite_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
    opt.max_connections(1);
    let db = Database::connect(opt).await.expect("connect sqlite");
    migration::Migrator::up(&db, None).await.expect("apply migrations");
    db
}

#[tokio::test]
async fn user_insert_and_find_round_trip() {
    let db = sqlite_db().await;
    let id = Uuid::new_v4();
    let am = user::ActiveModel { id: Set(id), full_name: Set("Ahmad".to_string()) };
    let inserted = am.insert(&db).await.expect("insert user");
    assert_eq!(inserted.id, id);

    let found = user::Entity::find_by_id(id).one(&db).await.expect("query user");
    assert_eq!(found, Some(user::Model { id, full_name: "Ahmad".to_string() }));
}

#[tokio::test]
async fn user_delete_reports_rows_affected() {
    let db = sqlite_db().await;
    let id = Uuid::new_v4();
    let am = user::ActiveModel { id: Set(id), full_name: Set("Ali".to_string()) };
    am.insert(&db).await.expect("insert user");

    let res = user::Entity::delete_by_id(id).exec(&db).await.expect("delete user");
    assert_eq!(res.rows_affected, 1);

    let res = user::Entity::delete_by_id(id).exec(&db).await.expect("delete user again");
    assert_eq!(res.rows_affected, 0);
}

#[tokio::test]
async fn find_all_returns_every_row() {
    let db = sqlite_db().await;
    for name in ["Ahmad", "Ali"] {
        let am = user::ActiveModel { id: Set(Uuid::new_v4()), full_name: Set(name.to_string()) };
        am.insert(&db).await.expect("insert user");
    }
    let all = user::Entity::find().all(&db).await.expect("query users");
    assert_eq!(all.len(), 2);
}
