//! Version-tracked data transitions.
//!
//! A transition is a one-off data change (backfill, cleanup) identified by
//! a timestamp version. Applied versions are recorded in the
//! `data_transitions` table so re-running the runner is a no-op; each
//! transition runs inside its own transaction and either lands together
//! with its version record or not at all.
//!
//! Schema changes do not belong here; those are ordinary migrations under
//! `migrations/`.

use diesel::pg::PgConnection;
use diesel::prelude::*;
use tracing::{debug, info};

mod fill_dummy_table;

diesel::table! {
    /// Tracking table for applied data transitions.
    data_transitions (version) {
        version -> Varchar,
        applied_at -> Timestamptz,
    }
}

/// Errors raised while applying transitions.
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    /// A transition body failed; nothing of it was recorded.
    #[error("transition {version} failed: {source}")]
    Failed {
        version: String,
        #[source]
        source: diesel::result::Error,
    },
    /// Tracking-table bookkeeping failed.
    #[error(transparent)]
    Database(#[from] diesel::result::Error),
}

/// A single data transition.
pub struct Transition {
    /// Timestamp version, `YYYYMMDDHHMMSS`. Orders and identifies the
    /// transition.
    pub version: &'static str,
    /// One-line summary for logs.
    pub description: &'static str,
    /// The transition body.
    pub run: fn(&mut PgConnection) -> Result<(), diesel::result::Error>,
}

/// Every transition this service ships, in application order.
pub fn registry() -> Vec<Transition> {
    vec![Transition {
        version: "20200604095405",
        description: "insert a timestamp row into dummy_table",
        run: fill_dummy_table::run,
    }]
}

/// Apply every transition that has not been recorded yet. Returns how many
/// were applied in this run.
pub fn run_pending(
    conn: &mut PgConnection,
    transitions: &[Transition],
) -> Result<usize, TransitionError> {
    ensure_tracking_table(conn)?;

    let mut applied = 0;
    for transition in transitions {
        if is_applied(conn, transition.version)? {
            debug!(version = transition.version, "transition already applied");
            continue;
        }

        conn.transaction::<(), TransitionError, _>(|conn| {
            (transition.run)(conn).map_err(|source| TransitionError::Failed {
                version: transition.version.to_owned(),
                source,
            })?;

            diesel::insert_into(data_transitions::table)
                .values(data_transitions::version.eq(transition.version))
                .execute(conn)?;
            Ok(())
        })?;

        info!(
            version = transition.version,
            description = transition.description,
            "transition applied"
        );
        applied += 1;
    }

    Ok(applied)
}

fn ensure_tracking_table(conn: &mut PgConnection) -> Result<(), TransitionError> {
    diesel::sql_query(
        "CREATE TABLE IF NOT EXISTS data_transitions (\
         version VARCHAR(64) PRIMARY KEY, \
         applied_at TIMESTAMPTZ NOT NULL DEFAULT now())",
    )
    .execute(conn)?;
    Ok(())
}

fn is_applied(conn: &mut PgConnection, version: &str) -> Result<bool, TransitionError> {
    let count: i64 = data_transitions::table
        .filter(data_transitions::version.eq(version))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    fn registry_versions_are_unique_and_ordered() {
        let transitions = registry();

        let versions: Vec<&str> = transitions
            .iter()
            .map(|transition| transition.version)
            .collect();
        let unique: HashSet<&&str> = versions.iter().collect();
        assert_eq!(unique.len(), versions.len());

        let mut sorted = versions.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, versions);
    }

    #[rstest]
    fn registry_versions_are_timestamps() {
        for transition in registry() {
            assert_eq!(transition.version.len(), 14);
            assert!(transition.version.chars().all(|c| c.is_ascii_digit()));
            assert!(!transition.description.is_empty());
        }
    }
}
