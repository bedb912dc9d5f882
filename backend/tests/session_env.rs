//! Session settings read from the real process environment.

use std::io::Write;

use actix_web::cookie::SameSite;
use blog::inbound::http::session_config::fingerprint::key_fingerprint;
use blog::inbound::http::session_config::{
    BuildMode, SessionConfigError, session_settings_from_env,
};
use env_lock::lock_env;
use mockable::DefaultEnv;
use rstest::rstest;
use tempfile::NamedTempFile;

const VARS: [&str; 5] = [
    "SESSION_COOKIE_SECURE",
    "SESSION_SAMESITE",
    "SESSION_ALLOW_EPHEMERAL",
    "SESSION_KEY_FILE",
    "SESSION_TTL_HOURS",
];

fn env_with(overrides: &[(&'static str, &str)]) -> Vec<(&'static str, Option<String>)> {
    VARS.iter()
        .map(|name| {
            let value = overrides
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| (*value).to_owned());
            (*name, value)
        })
        .collect()
}

fn key_file(fill: u8, len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create key file");
    file.write_all(&vec![fill; len]).expect("write key file");
    file
}

fn path_of(file: &NamedTempFile) -> &str {
    file.path().to_str().expect("utf8 temp path")
}

#[rstest]
fn release_settings_load_from_a_complete_environment() {
    let key = key_file(b'k', 64);
    let _guard = lock_env(env_with(&[
        ("SESSION_COOKIE_SECURE", "1"),
        ("SESSION_SAMESITE", "Strict"),
        ("SESSION_ALLOW_EPHEMERAL", "0"),
        ("SESSION_KEY_FILE", path_of(&key)),
        ("SESSION_TTL_HOURS", "12"),
    ]));

    let settings = session_settings_from_env(&DefaultEnv::new(), BuildMode::Release)
        .expect("complete environment loads");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
    assert_eq!(settings.ttl.whole_hours(), 12);
}

#[rstest]
fn release_rejects_missing_toggles() {
    let key = key_file(b'k', 64);
    let _guard = lock_env(env_with(&[("SESSION_KEY_FILE", path_of(&key))]));

    let err = session_settings_from_env(&DefaultEnv::new(), BuildMode::Release)
        .err()
        .expect("missing toggles fail");

    assert!(matches!(err, SessionConfigError::MissingEnv { .. }));
}

#[rstest]
fn same_key_file_gives_same_fingerprint() {
    let key = key_file(b'z', 64);
    let _guard = lock_env(env_with(&[("SESSION_KEY_FILE", path_of(&key))]));

    let first = session_settings_from_env(&DefaultEnv::new(), BuildMode::Debug)
        .expect("debug settings load");
    let second = session_settings_from_env(&DefaultEnv::new(), BuildMode::Debug)
        .expect("debug settings load");

    assert_eq!(key_fingerprint(&first.key), key_fingerprint(&second.key));
}

#[rstest]
fn debug_without_key_file_uses_a_fresh_key_each_time() {
    let _guard = lock_env(env_with(&[(
        "SESSION_KEY_FILE",
        "/nonexistent/blog/session_key",
    )]));

    let first = session_settings_from_env(&DefaultEnv::new(), BuildMode::Debug)
        .expect("debug falls back to a temporary key");
    let second = session_settings_from_env(&DefaultEnv::new(), BuildMode::Debug)
        .expect("debug falls back to a temporary key");

    assert_ne!(key_fingerprint(&first.key), key_fingerprint(&second.key));
}
