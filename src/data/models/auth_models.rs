use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::schema::{api_keys, users};

#[derive(Debug, Clone, Copy, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub user_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = api_keys)]
pub struct NewApiKey<'a> {
    pub user_id: i32,
    pub key_hash: &'a str,
    pub created_at: NaiveDateTime,
}
