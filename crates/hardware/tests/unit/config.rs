//! Configuration defaults and JSON deserialization.

use armsim_core::Config;
use pretty_assertions::assert_eq;

#[test]
fn defaults_are_consistent() {
    let config = Config::default();
    assert_eq!(config.memory.ram_base, 0x0010_0000);
    assert_eq!(config.memory.ram_size, 16 * 1024 * 1024);
    assert_eq!(config.general.start_pc, config.memory.ram_base);
    assert!(!config.general.trace_instructions);
    assert!(!config.general.halt_is_failure);
}

#[test]
fn json_overrides_selected_fields() {
    let config = Config::from_json(
        r#"{
            "general": { "start_pc": 4194304, "max_steps": 100 },
            "memory": { "ram_base": 4194304 }
        }"#,
    )
    .unwrap();
    assert_eq!(config.general.start_pc, 0x0040_0000);
    assert_eq!(config.general.max_steps, 100);
    assert_eq!(config.memory.ram_base, 0x0040_0000);
    // Unmentioned fields keep their defaults.
    assert_eq!(config.memory.ram_size, 16 * 1024 * 1024);
}

#[test]
fn empty_object_is_all_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.general.start_pc, Config::default().general.start_pc);
}

#[test]
fn malformed_json_reports_an_error() {
    assert!(Config::from_json("{ not json").is_err());
}
