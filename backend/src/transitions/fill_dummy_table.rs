//! Transition 20200604095405: insert the current time into the dummy table.

use diesel::pg::PgConnection;
use diesel::prelude::*;
use tracing::info;

/// Insert one timestamp row. Throttle writes like this in anything real.
pub(super) fn run(conn: &mut PgConnection) -> Result<(), diesel::result::Error> {
    let rows = diesel::sql_query("INSERT INTO dummy_table (created_at) VALUES (now())")
        .execute(conn)?;

    info!(rows, "filled dummy table");
    Ok(())
}
