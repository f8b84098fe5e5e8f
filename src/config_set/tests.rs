use super::literal::{self, PAGE_8K_ALIGN8};
use super::{ConfigState, ConfigurationSet, TableSource};
use crate::error::{Ceiling, Conflict, TableError};
use crate::generate::Tuning;
use crate::table::config::{AlignmentMode, ClassTableConfig, ConfigKey, PageSize};
use crate::validate::Invariant;

const K4_ALIGN8: ConfigKey = ConfigKey::new(PageSize::K4, AlignmentMode::Align8);
const K8_ALIGN8: ConfigKey = ConfigKey::new(PageSize::K8, AlignmentMode::Align8);
const K8_ALIGN16: ConfigKey = ConfigKey::new(PageSize::K8, AlignmentMode::Align16);
const K32_ALIGN8: ConfigKey = ConfigKey::new(PageSize::K32, AlignmentMode::Align8);

fn swapped_literal() -> Vec<crate::table::SizeClassDescriptor> {
    let mut classes = PAGE_8K_ALIGN8.to_vec();
    classes.swap(5, 6);
    classes
}

#[test]
fn test_literal_lengths() {
    let expected = [
        (K4_ALIGN8, 42),
        (ConfigKey::new(PageSize::K4, AlignmentMode::Align16), 45),
        (K8_ALIGN8, 82),
        (K8_ALIGN16, 85),
        (K32_ALIGN8, 74),
        (ConfigKey::new(PageSize::K32, AlignmentMode::Align16), 77),
        (ConfigKey::new(PageSize::K256, AlignmentMode::Align8), 85),
        (ConfigKey::new(PageSize::K256, AlignmentMode::Align16), 88),
    ];
    for (key, len) in expected {
        assert_eq!(literal::certified(key).len(), len, "{key}");
    }
}

#[test]
fn test_state_transitions() {
    use ConfigState::{Active, Generating, Loading, Rejected, Unconfigured, Validated};

    assert!(Unconfigured.can_advance_to(Generating));
    assert!(Unconfigured.can_advance_to(Loading));
    assert!(Generating.can_advance_to(Validated));
    assert!(Loading.can_advance_to(Rejected));
    assert!(Validated.can_advance_to(Active));

    assert!(!Unconfigured.can_advance_to(Active));
    assert!(!Rejected.can_advance_to(Validated));
    assert!(!Active.can_advance_to(Rejected));
    assert!(Active.is_terminal());
    assert!(Rejected.is_terminal());
    assert!(!Validated.is_terminal());
}

#[test]
fn test_builtin_set_validates_every_key() {
    let assembled = ConfigurationSet::builtin().assemble().unwrap();
    assert_eq!(assembled.keys().count(), 8);
    for key in ConfigKey::ALL {
        assert_eq!(assembled.state(key), Some(ConfigState::Validated), "{key}");
        assert!(assembled.report(key).unwrap().passed(), "{key}");
    }
    assembled.ensure_validated().unwrap();
}

#[test]
fn test_generated_set_validates_every_key() {
    let assembled = ConfigurationSet::generated().assemble().unwrap();
    for key in ConfigKey::ALL {
        assert_eq!(assembled.state(key), Some(ConfigState::Validated), "{key}");
    }
}

#[test]
fn test_activation_is_one_time() {
    let mut assembled = ConfigurationSet::builtin().assemble().unwrap();

    let active = assembled.activate(K8_ALIGN8).unwrap();
    assert_eq!(active.key(), K8_ALIGN8);
    assert_eq!(active.len(), 82);
    assert_eq!(active.get(1).map(|c| (c.size_bytes, c.pages_per_span)), Some((8, 1)));
    assert_eq!(active.max_size(), 262_144);
    assert_eq!(assembled.state(K8_ALIGN8), Some(ConfigState::Active));

    let again = assembled.activate(K8_ALIGN8).unwrap();
    assert_eq!(again, active);

    assert_eq!(
        assembled.activate(K4_ALIGN8),
        Err(TableError::ConfigurationConflict(Conflict::AlreadyActive {
            active: K8_ALIGN8,
            requested: K4_ALIGN8,
        }))
    );
    assert_eq!(assembled.state(K4_ALIGN8), Some(ConfigState::Validated));
}

#[test]
fn test_duplicate_key_conflicts() {
    let set = ConfigurationSet::new()
        .with_entry(
            K8_ALIGN8,
            ClassTableConfig::builtin(K8_ALIGN8),
            TableSource::Certified(PAGE_8K_ALIGN8),
        )
        .with_entry(
            K8_ALIGN8,
            ClassTableConfig::builtin(K8_ALIGN8),
            TableSource::Generate(Tuning::default()),
        );
    assert_eq!(set.len(), 2);
    assert_eq!(
        set.assemble().unwrap_err(),
        TableError::ConfigurationConflict(Conflict::DuplicateKey(K8_ALIGN8))
    );
}

#[test]
fn test_regime_must_share_max_block_size() {
    let smaller = ClassTableConfig {
        max_block_size: 131_072,
        ..ClassTableConfig::builtin(K32_ALIGN8)
    };
    let set = ConfigurationSet::new()
        .with_entry(
            K8_ALIGN8,
            ClassTableConfig::builtin(K8_ALIGN8),
            TableSource::Certified(PAGE_8K_ALIGN8),
        )
        .with_entry(K32_ALIGN8, smaller, TableSource::Generate(Tuning::default()))
        .with_entry(
            K4_ALIGN8,
            ClassTableConfig::builtin(K4_ALIGN8),
            TableSource::Certified(literal::certified(K4_ALIGN8)),
        );

    match set.check_consistency() {
        Err(TableError::ConfigurationConflict(Conflict::MaxBlockSize {
            first,
            first_max,
            second,
            second_max,
            ..
        })) => {
            assert_eq!((first, first_max), (K8_ALIGN8, 262_144));
            assert_eq!((second, second_max), (K32_ALIGN8, 131_072));
        }
        other => panic!("expected a max block size conflict, got {other:?}"),
    }
}

#[test]
fn test_small_and_standard_regimes_may_differ() {
    let set = ConfigurationSet::new()
        .with_entry(
            K4_ALIGN8,
            ClassTableConfig::builtin(K4_ALIGN8),
            TableSource::Certified(literal::certified(K4_ALIGN8)),
        )
        .with_entry(
            K8_ALIGN8,
            ClassTableConfig::builtin(K8_ALIGN8),
            TableSource::Certified(PAGE_8K_ALIGN8),
        );
    set.check_consistency().unwrap();
}

#[test]
fn test_key_must_match_parameters() {
    let set = ConfigurationSet::new().with_entry(
        K8_ALIGN8,
        ClassTableConfig::builtin(K8_ALIGN16),
        TableSource::Generate(Tuning::default()),
    );
    assert_eq!(
        set.check_consistency(),
        Err(TableError::ConfigurationConflict(Conflict::KeyMismatch {
            key: K8_ALIGN8,
            field: "abi_alignment",
            expected: 8,
            found: 16,
        }))
    );
}

#[test]
fn test_corrupt_table_is_rejected() {
    let mut assembled = ConfigurationSet::new()
        .with_entry(
            K8_ALIGN8,
            ClassTableConfig::builtin(K8_ALIGN8),
            TableSource::Provided(swapped_literal()),
        )
        .assemble()
        .unwrap();

    assert_eq!(assembled.state(K8_ALIGN8), Some(ConfigState::Rejected));
    assert!(assembled.report(K8_ALIGN8).unwrap().failed(Invariant::Monotonic));
    match assembled.activate(K8_ALIGN8) {
        Err(TableError::InvariantViolation(violation)) => {
            assert_eq!(violation.class, 6);
            assert_eq!(violation.invariant, Invariant::Monotonic);
        }
        other => panic!("expected an invariant violation, got {other:?}"),
    }
    assert!(assembled.ensure_validated().is_err());
    assert_eq!(assembled.state(K8_ALIGN8), Some(ConfigState::Rejected));
}

#[test]
fn test_infeasible_generation_is_rejected() {
    let mut assembled = ConfigurationSet::new()
        .with_entry(
            K8_ALIGN8,
            ClassTableConfig::builtin(K8_ALIGN8).with_waste_ceiling(1),
            TableSource::Generate(Tuning::default()),
        )
        .with_entry(
            K8_ALIGN16,
            ClassTableConfig::builtin(K8_ALIGN16),
            TableSource::Certified(literal::certified(K8_ALIGN16)),
        )
        .assemble()
        .unwrap();

    assert_eq!(assembled.state(K8_ALIGN8), Some(ConfigState::Rejected));
    assert!(assembled.report(K8_ALIGN8).is_none());
    assert!(matches!(
        assembled.error(K8_ALIGN8),
        Some(TableError::InfeasibleConfiguration(infeasible)) if infeasible.ceiling == Ceiling::Waste
    ));

    // The rejection is local to its own configuration.
    assert_eq!(assembled.state(K8_ALIGN16), Some(ConfigState::Validated));
    assert_eq!(assembled.activate(K8_ALIGN16).unwrap().len(), 85);
}

#[test]
fn test_unknown_key_is_not_configured() {
    let mut assembled = ConfigurationSet::new().assemble().unwrap();
    assert_eq!(
        assembled.activate(K8_ALIGN8),
        Err(TableError::NotConfigured(K8_ALIGN8))
    );
    assert_eq!(assembled.state(K8_ALIGN8), None);
}
