//! Bundled cast fixture (Monty Python and the Holy Grail).
//!
//! Loads 39 actors, 81 characters and the scene memberships of scenes 1-5.
//! Intended for fresh databases; loading twice fails on primary keys.

use super::DbResult;
use log::info;
use rusqlite::Connection;

const GRAIL_SQL: &str = include_str!("grail.sql");

/// Loads the cast fixture into a connection that already has the schema.
///
/// All rows are inserted in one transaction, so a failure leaves the
/// database untouched.
pub fn populate(conn: &mut Connection) -> DbResult<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(GRAIL_SQL)?;
    tx.commit()?;

    info!("event=db_populate module=db status=ok fixture=grail");
    Ok(())
}
