//! # Configuration Tests
//!
//! Defaults, partial JSON deserialization and validation.

use std::io::Write;

use tempfile::NamedTempFile;
use trapsim_core::SimError;
use trapsim_core::config::*;

fn json_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.interrupts.context_save_time, 10);
    assert_eq!(config.interrupts.syscall_vector, 10);
    assert_eq!(config.interrupts.end_io_vector, 10);
    assert_eq!(config.interrupts.fork_vector, 2);
    assert_eq!(config.interrupts.exec_vector, 3);
    assert_eq!(config.memory.partitions, vec![40, 25, 15, 10, 8, 2]);
    assert_eq!(config.exec.load_ticks_per_mb, 15);
    assert_eq!(config.exec.step_min, 1);
    assert_eq!(config.exec.step_max, 10);
    assert_eq!(config.exec.seed, 12345);
    assert_eq!(config.process.init_program, "init");
    assert_eq!(config.process.init_size, 1);
    assert_eq!(config.process.max_nesting_depth, 256);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_json_gives_defaults() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config.memory.partitions, vec![40, 25, 15, 10, 8, 2]);
    assert_eq!(config.exec.seed, 12345);
}

#[test]
fn test_partial_section_keeps_other_fields() {
    let config: Config =
        serde_json::from_str(r#"{ "interrupts": { "fork_vector": 7 } }"#).unwrap();
    assert_eq!(config.interrupts.fork_vector, 7);
    assert_eq!(config.interrupts.context_save_time, 10);
}

#[test]
fn test_from_json_file() {
    let file = json_file(r#"{ "memory": { "partitions": [30, 20, 10] }, "exec": { "seed": 1 } }"#);
    let config = Config::from_json_file(file.path()).unwrap();
    assert_eq!(config.memory.partitions, vec![30, 20, 10]);
    assert_eq!(config.exec.seed, 1);
}

#[test]
fn test_increasing_partitions_rejected() {
    let file = json_file(r#"{ "memory": { "partitions": [10, 20] } }"#);
    assert!(matches!(
        Config::from_json_file(file.path()),
        Err(SimError::InvalidConfig(_))
    ));
}

#[test]
fn test_empty_partitions_rejected() {
    let mut config = Config::default();
    config.memory.partitions.clear();
    assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
}

#[test]
fn test_reversed_step_range_rejected() {
    let mut config = Config::default();
    config.exec.step_min = 5;
    config.exec.step_max = 4;
    assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
}

#[test]
fn test_malformed_json_reports_path() {
    let file = json_file("{ not json");
    let err = Config::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, SimError::ConfigParse { .. }));
    assert!(err.to_string().contains(&file.path().display().to_string()));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Config::from_json_file(std::path::Path::new("/nonexistent/trapsim.json")).unwrap_err();
    assert!(matches!(err, SimError::Io { .. }));
}
