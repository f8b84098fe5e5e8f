use super::config::{AlignmentMode, BatchBound, ClassTableConfig, ConfigKey, PageSize, SizeRegime};
use super::descriptor::SizeClassDescriptor;
use super::metrics::{growth_limit, growth_pct, growth_within, SpanGeometry};
use super::page::{align_down, pages_for, prev_power_of_two};
use super::Table;
use crate::error::TableError;

fn small_table() -> Table {
    Table::from(vec![
        SizeClassDescriptor::SENTINEL,
        SizeClassDescriptor::new(8, 1, 32, 2048),
        SizeClassDescriptor::new(16, 1, 32, 2048),
        SizeClassDescriptor::new(32, 1, 32, 2048),
    ])
}

#[test]
fn test_page_arithmetic() {
    assert_eq!(prev_power_of_two(0), 0);
    assert_eq!(prev_power_of_two(1), 1);
    assert_eq!(prev_power_of_two(7), 4);
    assert_eq!(prev_power_of_two(8), 8);
    assert_eq!(prev_power_of_two(1000), 512);
    assert_eq!(align_down(1000, 16), 992);
    assert_eq!(align_down(1000, 0), 1000);
    assert_eq!(pages_for(8, 8192), 1);
    assert_eq!(pages_for(8192, 8192), 1);
    assert_eq!(pages_for(8193, 8192), 2);
}

#[test]
fn test_page_size_keys() {
    assert_eq!(PageSize::K4.bytes(), 4096);
    assert_eq!(PageSize::K8.bytes(), 8192);
    assert_eq!(PageSize::K32.bytes(), 32768);
    assert_eq!(PageSize::K256.bytes(), 262_144);
    assert_eq!(PageSize::from_bytes(32768), Some(PageSize::K32));
    assert_eq!(PageSize::from_bytes(16384), None);
    assert_eq!(PageSize::K4.regime(), SizeRegime::Small);
    assert_eq!(PageSize::K256.regime(), SizeRegime::Standard);
}

#[test]
fn test_config_key_parse_and_display() {
    let key: ConfigKey = "8k-align16".parse().unwrap();
    assert_eq!(key, ConfigKey::new(PageSize::K8, AlignmentMode::Align16));
    assert_eq!(key.to_string(), "8k-align16");

    for key in ConfigKey::ALL {
        assert_eq!(key.to_string().parse::<ConfigKey>().unwrap(), key);
    }

    assert!("3k-align8".parse::<ConfigKey>().is_err());
    assert!("8k".parse::<ConfigKey>().is_err());
    assert!("8k-align32".parse::<ConfigKey>().is_err());
}

#[test]
fn test_builtin_parameters() {
    let config = ClassTableConfig::builtin(ConfigKey::new(PageSize::K4, AlignmentMode::Align8));
    assert_eq!(config.page_size, 4096);
    assert_eq!(config.max_block_size, 8192);
    assert_eq!(config.max_classes, 46);
    assert_eq!(config.batch_bound, BatchBound::Ceiling);

    let config = ClassTableConfig::builtin(ConfigKey::new(PageSize::K8, AlignmentMode::Align16));
    assert_eq!(config.max_block_size, 262_144);
    assert_eq!(config.abi_alignment, 16);
    assert_eq!(config.max_pages_per_span, 32);
    assert_eq!(config.growth_ceiling_bps, 2500);

    for key in ConfigKey::ALL {
        ClassTableConfig::builtin(key).check().unwrap();
    }
}

#[test]
fn test_required_alignment() {
    let align8 = ClassTableConfig::builtin(ConfigKey::new(PageSize::K8, AlignmentMode::Align8));
    let align16 = ClassTableConfig::builtin(ConfigKey::new(PageSize::K8, AlignmentMode::Align16));

    assert_eq!(align16.required_alignment(8), 8);
    assert_eq!(align16.required_alignment(24), 16);
    assert_eq!(align16.required_alignment(4096), 16);
    assert_eq!(align8.required_alignment(24), 8);

    assert!(align8.is_aligned(24));
    assert!(!align16.is_aligned(24));
    assert!(align16.is_aligned(48));
    assert!(!align8.is_aligned(0));
    assert!(!align8.is_aligned(12));
}

#[test]
fn test_check_rejects_malformed_parameters() {
    let base = ClassTableConfig::builtin(ConfigKey::new(PageSize::K8, AlignmentMode::Align8));

    let bad_page = ClassTableConfig { page_size: 3000, ..base };
    assert_eq!(
        bad_page.check(),
        Err(TableError::InvalidParameter { name: "page_size", value: 3000 })
    );

    let bad_budget = base.with_max_classes(1);
    assert!(matches!(
        bad_budget.check(),
        Err(TableError::InvalidParameter { name: "max_classes", .. })
    ));

    let short_spans = ClassTableConfig { max_pages_per_span: 16, ..base };
    assert!(matches!(
        short_spans.check(),
        Err(TableError::InvalidParameter { name: "max_pages_per_span", .. })
    ));

    let inverted = ClassTableConfig { min_alignment: 32, ..base };
    assert!(matches!(
        inverted.check(),
        Err(TableError::InvalidParameter { name: "abi_alignment", .. })
    ));

    assert!(base.with_waste_ceiling(0).check().is_err());
    assert!(base.with_growth_ceiling(0).check().is_err());
}

#[test]
fn test_span_geometry() {
    let span = SpanGeometry::new(8, 1, 8192).unwrap();
    assert_eq!(span.objects, 1024);
    assert_eq!(span.waste_bytes, 48);
    assert!(span.waste_within(59));
    assert!(!span.waste_within(58));

    let span = SpanGeometry::new(640, 1, 8192).unwrap();
    assert_eq!(span.objects, 12);
    assert_eq!(span.waste_bytes, 512 + 48);

    assert!(SpanGeometry::new(0, 1, 8192).is_none());
    assert!(SpanGeometry::new(8, 0, 8192).is_none());
}

#[test]
fn test_waste_ordering_and_tolerance() {
    let one = SpanGeometry::new(640, 1, 8192).unwrap();
    let five = SpanGeometry::new(640, 5, 8192).unwrap();
    assert_eq!(five.waste_bytes, 48);
    assert!(five.cmp_waste(&one).is_lt());
    assert!(!one.within_tolerance_of(&five, 150));
    assert!(one.within_tolerance_of(&five, 700));
    assert!(five.within_tolerance_of(&five, 0));
}

#[test]
fn test_growth_bounds_are_exact() {
    assert!(growth_within(64, 80, 2500));
    assert!(!growth_within(64, 80, 2499));
    assert!(growth_within(80, 64, 1));
    assert_eq!(growth_limit(64, 2500), 80);
    assert_eq!(growth_limit(100, 2550), 125);
    assert!((growth_pct(64, 80) - 25.0).abs() < 1e-9);
    assert!(growth_pct(0, 8).abs() < f64::EPSILON);
}

#[test]
fn test_descriptor_derived_values() {
    let row = SizeClassDescriptor::new(4096, 1, 16, 128);
    assert_eq!(row.objects_per_span(8192), 2);
    assert_eq!(row.geometry(8192).unwrap().waste_bytes, 48);
    assert!(SizeClassDescriptor::SENTINEL.is_sentinel());
    assert!(!row.is_sentinel());
    assert_eq!(SizeClassDescriptor::SENTINEL.objects_per_span(8192), 0);
}

#[test]
fn test_class_index() {
    let table = small_table();
    assert_eq!(table.class_index(0), Some(1));
    assert_eq!(table.class_index(1), Some(1));
    assert_eq!(table.class_index(8), Some(1));
    assert_eq!(table.class_index(9), Some(2));
    assert_eq!(table.class_index(32), Some(3));
    assert_eq!(table.class_index(33), None);
    assert_eq!(table.max_size(), 32);

    let sentinel_only = Table::from(vec![SizeClassDescriptor::SENTINEL]);
    assert_eq!(sentinel_only.class_index(1), None);
    assert_eq!(Table::from(Vec::new()).class_index(1), None);
}

#[test]
fn test_byte_image() {
    let table = small_table();
    let bytes = table.as_bytes();
    assert_eq!(bytes.len(), 16 * table.len());
    assert_eq!(&bytes[..16], &[0u8; 16]);
    assert_eq!(&bytes[16..20], &8u32.to_ne_bytes());
    assert_eq!(&bytes[20..24], &1u32.to_ne_bytes());
}

#[test]
fn test_table_json() {
    let table = small_table();
    let json = serde_json::to_string(&table).unwrap();
    assert!(json.starts_with("[{\"size_bytes\":0,"));
    let parsed: Table = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, table);
}
