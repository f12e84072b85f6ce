#![cfg(feature = "config")]

use std::fs;
use pubstyle::{
    config::{ load_preset, write_preset, ConfigError },
    error::StyleError,
    memory::MemoryBackend,
    preset::PresetRegistry,
    style::{ RcValue, StyleOptions },
    Session,
};

const BASIC_TOML: &str = r##"
palette = ["#111111", "#222222", "#333333"]

[fix]
clean_spines = true
tight_layout = true
labelpad = 8

[rc]
"font.size" = 11.0
"##;

const THESIS_JSON: &str = r#"{
    "fix": { "clean_spines": false, "spine_linewidth": 0.75 },
    "rc": { "font.family": "serif", "figure.figsize": [6.0, 4.0] }
}"#;

#[test]
fn style_directory_replaces_builtins() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("basic.toml"), BASIC_TOML).unwrap();
    fs::write(dir.path().join("thesis.json"), THESIS_JSON).unwrap();
    fs::write(dir.path().join("README.md"), "not a style").unwrap();

    let reg = PresetRegistry::from_dir(dir.path()).unwrap();
    assert_eq!(reg.names(), vec!["basic", "thesis"]);

    let opts = reg.resolve(&"thesis".into(), &StyleOptions::new()).unwrap();
    assert_eq!(opts.clean_spines, Some(false));
    assert_eq!(opts.tight_layout, Some(true));
    assert_eq!(opts.labelpad, Some(8.0));
    assert_eq!(opts.spine_linewidth, Some(0.75));

    let mut session = Session::with_registry(MemoryBackend::new(), reg);
    session.set_style("thesis", &Default::default()).unwrap();
    let rc = session.backend().rc();
    assert_eq!(rc.get("font.size"), Some(&RcValue::Float(11.0)));
    assert_eq!(rc.get("font.family"), Some(&RcValue::from("serif")));
    assert_eq!(session.backend().palette().len(), 3);
}

#[test]
fn directory_without_baseline() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("thesis.json"), THESIS_JSON).unwrap();
    assert!(matches!(
        PresetRegistry::from_dir(dir.path()),
        Err(ConfigError::MissingBaseline(_))
    ));

    let mut reg = PresetRegistry::builtin();
    reg.load_dir(dir.path()).unwrap();
    assert!(reg.contains("thesis"));
    assert!(reg.contains("article"));
}

#[test]
fn bad_files_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let bad_key = dir.path().join("loud.toml");
    fs::write(&bad_key, "[rc]\n\"Font Size\" = 30\n").unwrap();
    assert!(matches!(load_preset(&bad_key), Err(ConfigError::InvalidRcKey(_, k)) if k == "Font Size"));

    let bad_opt = dir.path().join("odd.yaml");
    fs::write(&bad_opt, "fix:\n  sparkle: true\n").unwrap();
    assert!(matches!(load_preset(&bad_opt), Err(ConfigError::FileParse(..))));

    assert!(matches!(
        load_preset(dir.path().join("style.mplstyle")),
        Err(ConfigError::UnknownFormat(_))
    ));

    let err: StyleError = load_preset(dir.path().join("missing.toml")).unwrap_err().into();
    assert!(err.to_string().contains("couldn't read file"));
}

#[test]
fn write_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let reg = PresetRegistry::builtin();
    for name in ["basic", "article_s", "B&W"] {
        let path = dir.path().join(format!("{}.toml", name));
        let preset = reg.get(name).unwrap();
        write_preset(&path, preset).unwrap();
        assert_eq!(&load_preset(&path).unwrap(), preset);
    }
}
