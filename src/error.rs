//! Fatal errors raised while generating, certifying or activating a table.
//!
//! Every error is terminal for the configuration it names: nothing here is
//! retried, and no partially built table is ever returned alongside one.

use core::fmt;

use serde::Serialize;

use crate::table::config::{ClassTableConfig, ConfigKey, SizeRegime};
use crate::validate::Violation;

/// The ceiling a generator could not honour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Ceiling {
    /// No span size keeps fixed waste within the waste ceiling.
    Waste,
    /// The growth window above the previous class is empty.
    Growth,
    /// The class budget ran out before the maximum block size was reached.
    ClassCount,
}

impl fmt::Display for Ceiling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Waste => "fixed-waste ceiling",
            Self::Growth => "growth ceiling",
            Self::ClassCount => "class budget",
        })
    }
}

/// Where and why generation gave up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Infeasible {
    /// The ceiling that could not be met.
    pub ceiling: Ceiling,
    /// The size at which the search failed: the last accepted class, or the
    /// last rejected candidate when not even the first class fits.
    pub size: usize,
    /// Classes built so far, sentinel included.
    pub classes: usize,
    /// The parameters generation ran with.
    pub config: ClassTableConfig,
}

/// Two configurations, or a configuration and the process, disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Conflict {
    /// The same key was registered twice.
    DuplicateKey(ConfigKey),
    /// A configuration's parameters do not match the key it is filed under.
    KeyMismatch {
        /// The key the entry was registered with.
        key: ConfigKey,
        /// The mismatching parameter.
        field: &'static str,
        /// The value the key implies.
        expected: usize,
        /// The value the configuration carries.
        found: usize,
    },
    /// Two configurations of the same size regime disagree on the maximum block size.
    MaxBlockSize {
        /// The regime both keys belong to.
        regime: SizeRegime,
        /// The first key registered for the regime.
        first: ConfigKey,
        /// Its maximum block size.
        first_max: usize,
        /// The disagreeing key.
        second: ConfigKey,
        /// Its maximum block size.
        second_max: usize,
    },
    /// A different configuration was already activated for this process.
    AlreadyActive {
        /// The configuration currently active.
        active: ConfigKey,
        /// The configuration that was requested.
        requested: ConfigKey,
    },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey(key) => write!(f, "configuration {key} registered twice"),
            Self::KeyMismatch {
                key,
                field,
                expected,
                found,
            } => write!(
                f,
                "configuration {key} has {field} = {found}, its key requires {expected}"
            ),
            Self::MaxBlockSize {
                regime,
                first,
                first_max,
                second,
                second_max,
            } => write!(
                f,
                "{regime} regime disagrees on max block size: {first} uses {first_max}, {second} uses {second_max}"
            ),
            Self::AlreadyActive { active, requested } => write!(
                f,
                "cannot activate {requested}: {active} is already active"
            ),
        }
    }
}

/// The error type for table generation, certification and activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TableError {
    /// The generator cannot satisfy the configured ceilings.
    InfeasibleConfiguration(Infeasible),
    /// A table breaks one of the table invariants.
    InvariantViolation(Violation),
    /// Configurations contradict each other or the active selection.
    ConfigurationConflict(Conflict),
    /// A configuration parameter is malformed.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: usize,
    },
    /// Activation was requested for a key that is not part of the set.
    NotConfigured(ConfigKey),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InfeasibleConfiguration(infeasible) => write!(
                f,
                "infeasible configuration: {} exceeded at size {} after {} classes \
                 (page {}, max block {}, budget {}, waste {} bps, growth {} bps)",
                infeasible.ceiling,
                infeasible.size,
                infeasible.classes,
                infeasible.config.page_size,
                infeasible.config.max_block_size,
                infeasible.config.max_classes,
                infeasible.config.waste_ceiling_bps,
                infeasible.config.growth_ceiling_bps,
            ),
            Self::InvariantViolation(violation) => write!(f, "invariant violation: {violation}"),
            Self::ConfigurationConflict(conflict) => write!(f, "configuration conflict: {conflict}"),
            Self::InvalidParameter { name, value } => {
                write!(f, "invalid parameter {name} = {value}")
            }
            Self::NotConfigured(key) => write!(f, "configuration {key} is not part of the set"),
        }
    }
}

impl std::error::Error for TableError {}

impl From<Violation> for TableError {
    fn from(violation: Violation) -> Self {
        Self::InvariantViolation(violation)
    }
}

impl From<Conflict> for TableError {
    fn from(conflict: Conflict) -> Self {
        Self::ConfigurationConflict(conflict)
    }
}
