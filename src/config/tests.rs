use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_adagio_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("ADAGIO_CONFIG_PATH", "/tmp/adagio-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/adagio-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("adagio")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("adagio")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
progress_interval_ms = 500
autoplay_next = false

[controls]
scrub_seconds = 9

[ui]
follow_playback = false
header_text = "hello"
now_playing_time_fields = ["elapsed", "remaining"]
now_playing_time_separator = " | "

[catalog]
default_category = "Calm"
extensions = ["mp3"]
recursive = false
include_hidden = false
follow_links = false
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("ADAGIO_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("ADAGIO__PLAYBACK__PROGRESS_INTERVAL_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.progress_interval_ms, 500);
    assert!(!s.playback.autoplay_next);
    assert_eq!(s.controls.scrub_seconds, 9);
    assert!(!s.ui.follow_playback);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.now_playing_time_fields.len(), 2);
    assert!(matches!(s.ui.now_playing_time_fields[0], TimeField::Elapsed));
    assert!(matches!(s.ui.now_playing_time_fields[1], TimeField::Remaining));
    assert_eq!(s.ui.now_playing_time_separator, " | ");
    assert_eq!(s.catalog.default_category, "Calm");
    assert_eq!(s.catalog.extensions, vec!["mp3".to_string()]);
    assert!(!s.catalog.recursive);
    assert!(!s.catalog.include_hidden);
    assert!(!s.catalog.follow_links);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[controls]
scrub_seconds = 5
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("ADAGIO_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("ADAGIO__CONTROLS__SCRUB_SECONDS", "15");

    let s = Settings::load().unwrap();
    assert_eq!(s.controls.scrub_seconds, 15);
}

#[test]
fn validate_rejects_zero_progress_interval() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());
    s.playback.progress_interval_ms = 0;
    assert!(s.validate().is_err());
}

#[test]
fn validate_rejects_blank_default_category() {
    let mut s = Settings::default();
    s.catalog.default_category = "  ".to_string();
    assert!(s.validate().is_err());
}
