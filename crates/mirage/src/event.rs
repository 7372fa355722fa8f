use crate::{
    error::Error,
    model::{Model, registry},
    query::Statement,
    transport::{self, Transport},
};
use tracing::debug;

///
/// EventFrames
///
/// Substitution context handed to an event's effect closure. Exposes the
/// field snapshots the trigger can address on the server.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct EventFrames;

impl EventFrames {
    /// Pre-change snapshot accessor (`$before.<field>`).
    #[must_use]
    pub fn before(self, field: &str) -> String {
        format!("$before.{field}")
    }

    /// Post-change snapshot accessor (`$after.<field>`).
    #[must_use]
    pub fn after(self, field: &str) -> String {
        format!("$after.{field}")
    }
}

///
/// EventSpec
///
/// One lifecycle rule: fires when any watched field changes, runs the
/// effect statement server-side. Nothing executes client-side; rules exist
/// only as compiled trigger definitions.
///

pub struct EventSpec {
    pub name: &'static str,
    /// Fields whose change fires the event. Changes outside this set do
    /// not fire it. An empty set fires on every change.
    pub when: &'static [&'static str],
    /// Effect statement, rendered with the `$before`/`$after` frames.
    pub then: fn(&EventFrames) -> String,
}

///
/// EventManager
///
/// Rules compiled against one owning table.
///

pub struct EventManager {
    statements: Vec<Statement>,
}

impl EventManager {
    /// Compile the given rules into trigger definitions bound to the
    /// model's table.
    pub fn define<M: Model>(specs: &[EventSpec]) -> Result<Self, Error> {
        let table = registry::table_name(M::TYPE_NAME)?;
        let frames = EventFrames;

        let statements = specs
            .iter()
            .map(|spec| {
                let condition = if spec.when.is_empty() {
                    "true".to_string()
                } else {
                    spec.when
                        .iter()
                        .map(|field| {
                            format!("{} != {}", frames.before(field), frames.after(field))
                        })
                        .collect::<Vec<_>>()
                        .join(" OR ")
                };

                Statement::new(format!(
                    "DEFINE EVENT {} ON TABLE {table} WHEN {condition} THEN ({});",
                    spec.name,
                    (spec.then)(&frames)
                ))
            })
            .collect();

        Ok(Self { statements })
    }

    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Install the trigger definitions on the server.
    pub async fn apply<C: Transport>(&self, client: &C) -> Result<(), Error> {
        for statement in &self.statements {
            debug!(statement = %statement, "defining event");
            let responses = client.query(statement.as_str()).await?;
            transport::expect_first(responses)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Issue, register_issue};

    #[test]
    fn rules_compile_to_table_bound_triggers() {
        register_issue();
        let manager = EventManager::define::<Issue>(&[EventSpec {
            name: "status_changed",
            when: &["status"],
            then: |frames| {
                format!(
                    "UPDATE activity SET status = {} WHERE issue = {}",
                    frames.after("status"),
                    frames.after("id")
                )
            },
        }])
        .unwrap();

        assert_eq!(
            manager.statements()[0].as_str(),
            "DEFINE EVENT status_changed ON TABLE issue \
             WHEN $before.status != $after.status \
             THEN (UPDATE activity SET status = $after.status WHERE issue = $after.id);"
        );
    }

    #[test]
    fn watched_set_disjunction_covers_every_field() {
        register_issue();
        let manager = EventManager::define::<Issue>(&[EventSpec {
            name: "triage",
            when: &["status", "title"],
            then: |_| "UPDATE metrics SET triaged += 1".to_string(),
        }])
        .unwrap();

        assert_eq!(
            manager.statements()[0].as_str(),
            "DEFINE EVENT triage ON TABLE issue \
             WHEN $before.status != $after.status OR $before.title != $after.title \
             THEN (UPDATE metrics SET triaged += 1);"
        );
    }

    #[test]
    fn empty_watched_set_fires_always() {
        register_issue();
        let manager = EventManager::define::<Issue>(&[EventSpec {
            name: "audit",
            when: &[],
            then: |_| "UPDATE audit SET touched += 1".to_string(),
        }])
        .unwrap();

        assert!(
            manager.statements()[0]
                .as_str()
                .contains("WHEN true THEN")
        );
    }
}
