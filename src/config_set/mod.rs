//! The closed set of configurations a build can select from.
//!
//! A [`ConfigurationSet`] registers at most one table source per
//! [`ConfigKey`]. [`ConfigurationSet::assemble`] checks the set for
//! contradictions, then generates or loads every table and certifies it. The
//! resulting [`AssembledSet`] hands out only certified tables, and
//! [`install`] publishes exactly one of them process-wide.

mod global;
pub mod literal;
mod state;

#[cfg(test)]
mod tests;

use core::ops::Deref;
use std::sync::Arc;

pub use global::{activate_builtin, active, install};
pub use state::ConfigState;

use crate::error::{Conflict, TableError};
use crate::generate::{ClassTableGenerator, Tuning};
use crate::table::config::{BatchBound, ClassTableConfig, ConfigKey, SizeRegime};
use crate::table::descriptor::SizeClassDescriptor;
use crate::table::Table;
use crate::validate::{validate, ValidationReport};

/// Where a configuration's table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    /// Run the generator with this tuning.
    Generate(Tuning),
    /// Load a certified literal.
    Certified(&'static [SizeClassDescriptor]),
    /// Load an externally authored table.
    Provided(Vec<SizeClassDescriptor>),
}

/// One registered configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    /// Key the configuration is selected by.
    pub key: ConfigKey,
    /// Parameters the table is built and certified against.
    pub config: ClassTableConfig,
    /// Table source.
    pub source: TableSource,
}

/// Configurations awaiting assembly.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationSet {
    entries: Vec<ConfigEntry>,
}

impl ConfigurationSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All eight keys, each loading its certified literal.
    #[must_use]
    pub fn builtin() -> Self {
        ConfigKey::ALL.into_iter().fold(Self::new(), |set, key| {
            set.with_entry(
                key,
                ClassTableConfig::builtin(key),
                TableSource::Certified(literal::certified(key)),
            )
        })
    }

    /// All eight keys, each generated with default tuning and held to the
    /// strict batch bound.
    #[must_use]
    pub fn generated() -> Self {
        ConfigKey::ALL.into_iter().fold(Self::new(), |set, key| {
            set.with_entry(
                key,
                ClassTableConfig::builtin(key).with_batch_bound(BatchBound::ObjectsPerSpan),
                TableSource::Generate(Tuning::default()),
            )
        })
    }

    /// Adds an entry.
    #[must_use]
    pub fn with_entry(mut self, key: ConfigKey, config: ClassTableConfig, source: TableSource) -> Self {
        self.insert(key, config, source);
        self
    }

    /// Adds an entry. Duplicates are reported by [`Self::check_consistency`].
    pub fn insert(&mut self, key: ConfigKey, config: ClassTableConfig, source: TableSource) {
        self.entries.push(ConfigEntry { key, config, source });
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered keys, in registration order.
    pub fn keys(&self) -> impl Iterator<Item = ConfigKey> + '_ {
        self.entries.iter().map(|entry| entry.key)
    }

    /// Checks the set for contradictions between entries.
    ///
    /// # Errors
    ///
    /// [`TableError::ConfigurationConflict`] for a duplicate key, an entry
    /// whose parameters disagree with its key, or two entries of one size
    /// regime with different maximum block sizes.
    pub fn check_consistency(&self) -> Result<(), TableError> {
        let mut regimes: Vec<(SizeRegime, ConfigKey, usize)> = Vec::new();
        for (index, entry) in self.entries.iter().enumerate() {
            let key = entry.key;
            if self.entries[..index].iter().any(|earlier| earlier.key == key) {
                return Err(Conflict::DuplicateKey(key).into());
            }
            let derived = [
                ("page_size", key.page.bytes(), entry.config.page_size),
                ("abi_alignment", key.alignment.bytes(), entry.config.abi_alignment),
            ];
            if let Some(&(field, expected, found)) = derived.iter().find(|(_, e, f)| e != f) {
                return Err(Conflict::KeyMismatch {
                    key,
                    field,
                    expected,
                    found,
                }
                .into());
            }

            let regime = key.page.regime();
            let max = entry.config.max_block_size;
            match regimes.iter().find(|(r, ..)| *r == regime) {
                Some(&(_, first, first_max)) if first_max != max => {
                    return Err(Conflict::MaxBlockSize {
                        regime,
                        first,
                        first_max,
                        second: key,
                        second_max: max,
                    }
                    .into());
                }
                Some(_) => {}
                None => regimes.push((regime, key, max)),
            }
        }
        Ok(())
    }

    /// Checks the set, then produces and certifies every table.
    ///
    /// A table that fails generation or certification rejects only its own
    /// configuration; the error is kept for [`AssembledSet::activate`].
    ///
    /// # Errors
    ///
    /// Set-level conflicts from [`Self::check_consistency`].
    pub fn assemble(self) -> Result<AssembledSet, TableError> {
        self.check_consistency()?;

        #[cfg(feature = "parallel")]
        let slots: Vec<Slot> = {
            use rayon::prelude::*;
            self.entries.into_par_iter().map(Slot::prepare).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let slots: Vec<Slot> = self.entries.into_iter().map(Slot::prepare).collect();

        trace_info!(
            configurations = slots.len(),
            rejected = slots.iter().filter(|s| s.state == ConfigState::Rejected).count(),
            "assembled configuration set"
        );
        Ok(AssembledSet { slots })
    }
}

#[derive(Debug)]
struct Slot {
    key: ConfigKey,
    config: ClassTableConfig,
    state: ConfigState,
    table: Option<Arc<Table>>,
    report: Option<ValidationReport>,
    error: Option<TableError>,
}

impl Slot {
    fn prepare(entry: ConfigEntry) -> Self {
        let ConfigEntry { key, config, source } = entry;
        let mut slot = Self {
            key,
            config,
            state: ConfigState::Unconfigured,
            table: None,
            report: None,
            error: None,
        };

        let produced = match source {
            TableSource::Generate(tuning) => {
                slot.state.advance(ConfigState::Generating);
                ClassTableGenerator::new(config).with_tuning(tuning).generate()
            }
            TableSource::Certified(rows) => {
                slot.state.advance(ConfigState::Loading);
                Ok(Table::from(rows))
            }
            TableSource::Provided(rows) => {
                slot.state.advance(ConfigState::Loading);
                Ok(Table::from(rows))
            }
        };
        let certified = produced.and_then(|table| {
            let report = validate(table.classes(), &config);
            let checked = report.check();
            slot.report = Some(report);
            checked.map(|()| table)
        });

        match certified {
            Ok(table) => {
                trace_debug!(%key, classes = table.len(), "configuration validated");
                slot.state.advance(ConfigState::Validated);
                slot.table = Some(Arc::new(table));
            }
            Err(error) => {
                trace_warn!(%key, %error, "configuration rejected");
                slot.state.advance(ConfigState::Rejected);
                slot.error = Some(error);
            }
        }
        slot
    }
}

/// A set whose tables have all been produced and certified (or rejected).
#[derive(Debug)]
pub struct AssembledSet {
    slots: Vec<Slot>,
}

impl AssembledSet {
    fn slot(&self, key: ConfigKey) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.key == key)
    }

    /// Keys in the set.
    pub fn keys(&self) -> impl Iterator<Item = ConfigKey> + '_ {
        self.slots.iter().map(|slot| slot.key)
    }

    /// Lifecycle state of `key`.
    #[must_use]
    pub fn state(&self, key: ConfigKey) -> Option<ConfigState> {
        self.slot(key).map(|slot| slot.state)
    }

    /// Validation report of `key`, if its table got far enough to be validated.
    #[must_use]
    pub fn report(&self, key: ConfigKey) -> Option<&ValidationReport> {
        self.slot(key).and_then(|slot| slot.report.as_ref())
    }

    /// The error that rejected `key`.
    #[must_use]
    pub fn error(&self, key: ConfigKey) -> Option<&TableError> {
        self.slot(key).and_then(|slot| slot.error.as_ref())
    }

    /// Fails with the first rejection, if any.
    ///
    /// # Errors
    ///
    /// The error that rejected the first rejected configuration.
    pub fn ensure_validated(&self) -> Result<(), TableError> {
        match self.slots.iter().find_map(|slot| slot.error.as_ref()) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    /// Hands out the certified table of `key` and marks it active.
    ///
    /// Activating the already-active key again returns the same table.
    ///
    /// # Errors
    ///
    /// [`TableError::NotConfigured`] for unknown keys, the rejecting error
    /// for rejected keys, and [`Conflict::AlreadyActive`] when another key of
    /// this set is already active.
    pub fn activate(&mut self, key: ConfigKey) -> Result<ActiveTable, TableError> {
        if let Some(active) = self
            .slots
            .iter()
            .find(|slot| slot.state == ConfigState::Active && slot.key != key)
        {
            return Err(Conflict::AlreadyActive {
                active: active.key,
                requested: key,
            }
            .into());
        }

        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.key == key)
            .ok_or(TableError::NotConfigured(key))?;
        if let Some(error) = &slot.error {
            return Err(error.clone());
        }
        let table = slot.table.clone().ok_or(TableError::NotConfigured(key))?;
        if slot.state == ConfigState::Validated {
            slot.state.advance(ConfigState::Active);
            trace_info!(%key, classes = table.len(), "configuration activated");
        }
        Ok(ActiveTable {
            key,
            config: slot.config,
            table,
        })
    }
}

/// A certified table selected for use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTable {
    key: ConfigKey,
    config: ClassTableConfig,
    table: Arc<Table>,
}

impl ActiveTable {
    /// The selected key.
    #[must_use]
    pub fn key(&self) -> ConfigKey {
        self.key
    }

    /// The parameters the table was certified against.
    #[must_use]
    pub fn config(&self) -> &ClassTableConfig {
        &self.config
    }

    /// The table.
    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }
}

impl Deref for ActiveTable {
    type Target = Table;

    fn deref(&self) -> &Table {
        &self.table
    }
}
