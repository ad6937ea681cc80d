//! Tests for configuration system

use mealboard::Config;
use std::path::PathBuf;
use temp_dir::TempDir;

#[test]
fn test_config_loads_from_default_toml() {
    let config = Config::load(None).expect("Failed to load config");

    assert_eq!(config.data.dir, PathBuf::from("data"));
    assert_eq!(config.data.meals_file, "meals_data.json");
    assert_eq!(config.data.recipes_file, "recipes.json");
    assert_eq!(config.observability.log_level, "info");
    assert!(!config.observability.json);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_loads_from_explicit_path() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("mealboard.toml");
    std::fs::write(
        &path,
        r#"
[data]
dir = "/var/lib/mealboard"
recipes_file = "favorites.json"

[observability]
json = true
"#,
    )?;

    let config = Config::load(Some(path.to_string_lossy().into_owned()))?;

    assert_eq!(config.data.dir, PathBuf::from("/var/lib/mealboard"));
    assert_eq!(config.data.recipes_file, "favorites.json");
    // untouched keys keep their defaults
    assert_eq!(config.data.meals_file, "meals_data.json");
    assert!(config.observability.json);

    Ok(())
}

#[test]
fn test_config_missing_file_falls_back_to_defaults() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("absent.toml");

    let config = Config::load(Some(path.to_string_lossy().into_owned()))?;

    assert_eq!(config.data.meals_file, "meals_data.json");
    assert!(config.validate().is_ok());

    Ok(())
}

#[test]
fn test_config_env_override() -> anyhow::Result<()> {
    // only this test reads the shuffle seed, other tests are unaffected
    unsafe {
        std::env::set_var("MEALBOARD__SHUFFLE__SEED", "1234");
    }

    let config = Config::load(None)?;

    unsafe {
        std::env::remove_var("MEALBOARD__SHUFFLE__SEED");
    }

    assert_eq!(config.shuffle.seed, Some(1234));

    Ok(())
}
