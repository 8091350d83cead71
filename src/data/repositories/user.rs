use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sql_types::Integer;

use crate::data::models::{NewApiKey, NewUser, User};
use crate::schema::{api_keys, users};

pub struct UserRepository;

impl UserRepository {
    /// Creates a user owning one API key, stored as `key_hash`.
    pub fn create_with_key(
        conn: &mut SqliteConnection,
        key_hash: &str,
        now: NaiveDateTime,
    ) -> Result<User, diesel::result::Error> {
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::insert_into(users::table)
                .values(&NewUser { created_at: now })
                .execute(conn)?;

            let user_id = diesel::select(diesel::dsl::sql::<Integer>("last_insert_rowid()"))
                .get_result::<i32>(conn)?;

            diesel::insert_into(api_keys::table)
                .values(&NewApiKey {
                    user_id,
                    key_hash,
                    created_at: now,
                })
                .execute(conn)?;

            users::table
                .find(user_id)
                .select(User::as_select())
                .first(conn)
        })
    }

    pub fn find_by_key_hash(
        conn: &mut SqliteConnection,
        key_hash: &str,
    ) -> Result<Option<User>, diesel::result::Error> {
        api_keys::table
            .inner_join(users::table)
            .filter(api_keys::key_hash.eq(key_hash))
            .select(User::as_select())
            .first(conn)
            .optional()
    }
}
