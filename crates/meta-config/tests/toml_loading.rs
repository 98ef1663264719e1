//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed working directory and env var changes.

use std::path::PathBuf;

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use meta_config::{ConfigError, MetaConfig};
use pretty_assertions::assert_eq;

#[test]
fn loads_include_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[includes]
search_dirs = ["include", "/opt/ltp/include"]
max_depth = 5
skip = ["tst_test.h"]
skip_prefixes = ["lapi/", "old/"]
"#,
        )?;

        let config: MetaConfig = Figment::from(Serialized::defaults(MetaConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(
            config.includes.search_dirs,
            [PathBuf::from("include"), PathBuf::from("/opt/ltp/include")]
        );
        assert_eq!(config.includes.max_depth, 5);
        assert_eq!(config.includes.max_search_dirs, 5);
        assert_eq!(config.includes.skip, ["tst_test.h"]);
        assert_eq!(config.includes.skip_prefixes, ["lapi/", "old/"]);
        assert_eq!(config.output.indent, 2);
        Ok(())
    });
}

#[test]
fn partial_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[output]\nindent = 4\n")?;

        let config: MetaConfig = Figment::from(Serialized::defaults(MetaConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.output.indent, 4);
        assert_eq!(config.includes, MetaConfig::default().includes);
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up() {
    Jail::expect_with(|jail| {
        let xdg = jail.directory().join("xdg");
        jail.set_env("XDG_CONFIG_HOME", xdg.display());
        jail.create_file("metaparse.toml", "[includes]\nmax_depth = 1\n")?;

        let config = MetaConfig::load().expect("config loads");
        assert_eq!(config.includes.max_depth, 1);
        Ok(())
    });
}

#[cfg(target_os = "linux")]
#[test]
fn project_file_beats_user_file() {
    Jail::expect_with(|jail| {
        let xdg = jail.directory().to_path_buf();
        jail.set_env("XDG_CONFIG_HOME", xdg.display());
        std::fs::create_dir_all(xdg.join("metaparse")).unwrap();
        jail.create_file(
            "metaparse/config.toml",
            "[includes]\nmax_depth = 7\nmax_search_dirs = 9\n",
        )?;
        jail.create_file("metaparse.toml", "[includes]\nmax_depth = 2\n")?;

        let config = MetaConfig::load().expect("config loads");
        assert_eq!(config.includes.max_depth, 2);
        assert_eq!(config.includes.max_search_dirs, 9);
        Ok(())
    });
}

#[test]
fn invalid_value_in_file_is_rejected() {
    Jail::expect_with(|jail| {
        let xdg = jail.directory().join("xdg");
        jail.set_env("XDG_CONFIG_HOME", xdg.display());
        jail.create_file("metaparse.toml", "[includes]\nmax_depth = 0\n")?;

        let err = MetaConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }), "{err}");
        Ok(())
    });
}

#[test]
fn malformed_toml_is_a_figment_error() {
    Jail::expect_with(|jail| {
        let xdg = jail.directory().join("xdg");
        jail.set_env("XDG_CONFIG_HOME", xdg.display());
        jail.create_file("metaparse.toml", "[includes\nmax_depth = ")?;

        let err = MetaConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)), "{err}");
        Ok(())
    });
}
