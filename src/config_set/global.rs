use std::sync::OnceLock;

use super::{literal, ActiveTable, ConfigurationSet, TableSource};
use crate::error::{Conflict, TableError};
use crate::table::config::{ClassTableConfig, ConfigKey};

static ACTIVE: OnceLock<ActiveTable> = OnceLock::new();

/// Publishes `table` as the process-wide size-class table.
///
/// Selection happens once: installing the table that is already installed
/// returns it again, anything else is refused.
///
/// # Errors
///
/// [`Conflict::AlreadyActive`] when a different table was installed first.
pub fn install(table: ActiveTable) -> Result<&'static ActiveTable, TableError> {
    let requested = table.clone();
    let active = ACTIVE.get_or_init(|| table);
    if *active == requested {
        Ok(active)
    } else {
        Err(Conflict::AlreadyActive {
            active: active.key(),
            requested: requested.key(),
        }
        .into())
    }
}

/// The process-wide table, once one is installed.
///
/// Readers never block: after installation this is a plain shared reference.
pub fn active() -> Option<&'static ActiveTable> {
    ACTIVE.get()
}

/// Certifies the shipped literal for `key` and installs it.
///
/// # Errors
///
/// Any certification failure of the literal, or a conflicting earlier
/// installation.
pub fn activate_builtin(key: ConfigKey) -> Result<&'static ActiveTable, TableError> {
    if let Some(active) = active() {
        if active.key() != key {
            return Err(Conflict::AlreadyActive {
                active: active.key(),
                requested: key,
            }
            .into());
        }
        return Ok(active);
    }
    let mut assembled = ConfigurationSet::new()
        .with_entry(
            key,
            ClassTableConfig::builtin(key),
            TableSource::Certified(literal::certified(key)),
        )
        .assemble()?;
    install(assembled.activate(key)?)
}
