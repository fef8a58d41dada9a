//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.
//! Each test runs inside a `figment::Jail`, which gives it a scratch working
//! directory and restores the environment afterwards.

use ballpark::config::AppConfig;
use figment::Jail;
use std::path::Path;

#[test]
fn test_env_override() {
    Jail::expect_with(|jail| {
        jail.set_env("BALLPARK_WINDOW__TITLE", "Test From Env");
        jail.set_env("BALLPARK_CLIPPING__HARDWARE_LIMIT", "4");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.window.title, "Test From Env");
        assert_eq!(config.clipping.hardware_limit, Some(4));
        Ok(())
    });
}

#[test]
fn test_default_file_matches_builtin_defaults() {
    Jail::expect_with(|_jail| {
        let config_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("config");
        assert!(config_dir.join("default.toml").exists());

        let loaded = AppConfig::load_from(&config_dir).expect("default.toml loads");
        let builtin = AppConfig::default();
        assert_eq!(loaded.clipping.pool_capacity, builtin.clipping.pool_capacity);
        assert_eq!(loaded.clipping.hardware_limit, None);
        assert_eq!(loaded.analysis.default_tool, builtin.analysis.default_tool);
        assert_eq!(loaded.pointer.start_position, builtin.pointer.start_position);
        Ok(())
    });
}

#[test]
fn test_user_file_overrides_default() {
    Jail::expect_with(|jail| {
        jail.create_dir("config")?;
        jail.create_file("config/default.toml", "[clipping]\npool_capacity = 6\n")?;
        jail.create_file("config/user.toml", "[clipping]\npool_capacity = 3\n")?;

        // load() reads ./config, which is the jail's
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.clipping.pool_capacity, 3);
        assert!(config.rendering.show_park);
        Ok(())
    });
}

#[test]
fn test_env_beats_user_file() {
    Jail::expect_with(|jail| {
        jail.create_file("user.toml", "[clipping]\npool_capacity = 3\n")?;
        jail.set_env("BALLPARK_CLIPPING__POOL_CAPACITY", "5");

        let config = AppConfig::load_from(jail.directory()).expect("config loads");
        assert_eq!(config.clipping.pool_capacity, 5);
        Ok(())
    });
}

#[test]
fn test_missing_directory_uses_defaults() {
    Jail::expect_with(|_jail| {
        let config = AppConfig::load_from("does/not/exist").expect("defaults load");
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.debug.log_level, "info");
        Ok(())
    });
}

#[test]
fn test_bad_value_is_an_error() {
    Jail::expect_with(|jail| {
        jail.create_file("default.toml", "[clipping]\npool_capacity = \"many\"\n")?;

        let err = AppConfig::load_from(jail.directory()).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
        Ok(())
    });
}
