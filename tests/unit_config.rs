use std::fs;

use todoview::config::{Config, CONFIG_FILE_NAME};
use todoview::source::DEFAULT_ENDPOINT;
use todoview::Error;

#[test]
fn config_defaults_when_missing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config = Config::load(&dir.path().join(CONFIG_FILE_NAME));
    assert!(config.is_err());

    let config = Config::default();
    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.page_size, 10);
    Ok(())
}

#[test]
fn config_overrides_from_toml() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let toml = r#"
endpoint = "http://localhost:8080/todos"
page_size = 25

[ui]
narrow_width = 80
"#;
    fs::write(dir.path().join(CONFIG_FILE_NAME), toml)?;

    let config = Config::discover(None, dir.path())?;
    assert_eq!(config.endpoint, "http://localhost:8080/todos");
    assert_eq!(config.page_size, 25);
    assert_eq!(config.ui.narrow_width, 80);
    Ok(())
}

#[test]
fn explicit_config_must_exist() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("nope.toml");
    let result = Config::discover(Some(&missing), dir.path());
    assert!(matches!(result, Err(Error::ConfigNotFound(_))));
    Ok(())
}

#[test]
fn config_load_rejects_invalid_toml() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&config_path, "this = [not valid").expect("write config");

    let result = Config::load(&config_path);
    assert!(result.is_err());
}

#[test]
fn config_rejects_mistyped_values() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&config_path, "page_size = -3\n").expect("write config");
    assert!(matches!(Config::load(&config_path), Err(Error::TomlParse(_))));
}
