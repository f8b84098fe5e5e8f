use sizeclass::config_set::{self, activate_builtin, active, install};
use sizeclass::{ConfigKey, ConfigurationSet, Conflict, TableError};
use std::thread;

// Process-wide selection is one-time, so the whole lifecycle runs in a single
// test to keep the outcome independent of test ordering.
#[test]
fn test_process_wide_activation() {
    let k8: ConfigKey = "8k-align8".parse().unwrap();
    let k32: ConfigKey = "32k-align16".parse().unwrap();

    assert!(active().is_none());

    let mut assembled = ConfigurationSet::builtin().assemble().unwrap();
    let selected = assembled.activate(k8).unwrap();
    let installed = install(selected.clone()).unwrap();
    assert_eq!(installed.key(), k8);
    assert_eq!(installed.len(), 82);

    // Installing the same table again is a no-op.
    assert_eq!(install(selected).unwrap().key(), k8);
    assert_eq!(activate_builtin(k8).unwrap().key(), k8);

    let other = ConfigurationSet::builtin().assemble().unwrap().activate(k32).unwrap();
    assert_eq!(
        install(other).unwrap_err(),
        TableError::ConfigurationConflict(Conflict::AlreadyActive {
            active: k8,
            requested: k32,
        })
    );
    assert!(matches!(
        activate_builtin(k32),
        Err(TableError::ConfigurationConflict(Conflict::AlreadyActive { .. }))
    ));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            thread::spawn(|| {
                let table = config_set::active().unwrap();
                (table.key(), table.class_index(100))
            })
        })
        .collect();
    for reader in readers {
        let (key, class) = reader.join().unwrap();
        assert_eq!(key, k8);
        assert_eq!(class, installed.class_index(100));
    }
}
