use super::*;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicU32, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

static TEMP_CONFIGS: AtomicU32 = AtomicU32::new(0);

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

fn temp_config(contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let seq = TEMP_CONFIGS.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!("catalog-config-{suffix}-{seq}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join("catalog.toml");
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn api_base_is_trimmed_and_defaulted() {
    assert_eq!(
        prepare_api_base("  http://api.example.com:8080/// ").expect("valid"),
        "http://api.example.com:8080"
    );
    assert_eq!(prepare_api_base("").expect("default"), DEFAULT_API_BASE);
    assert_eq!(prepare_api_base(" / ").expect("default"), DEFAULT_API_BASE);
}

#[test]
fn api_base_must_be_an_http_url() {
    assert!(matches!(
        prepare_api_base("not a url"),
        Err(ConfigError::InvalidBaseUrl { .. })
    ));
    assert!(matches!(
        prepare_api_base("ftp://files.example.com"),
        Err(ConfigError::UnsupportedScheme(_))
    ));
    assert!(prepare_api_base("https://shop.example.com").is_ok());
}

#[test]
fn namespaced_env_var_wins_over_plain_one() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_of(&[
            ("PRODUCT_API_BASE", "http://plain:1"),
            ("APP__PRODUCT_API_BASE", "http://namespaced:2"),
            ("APP__LOG_FILTER", "debug"),
            ("APP__REQUEST_TIMEOUT_SECS", " 5 "),
        ]),
    );
    assert_eq!(settings.api_base, "http://namespaced:2");
    assert_eq!(settings.log_filter, "debug");
    assert_eq!(settings.request_timeout(), Duration::from_secs(5));
}

#[test]
fn plain_env_var_sets_the_base() {
    let mut settings = Settings::default();
    apply_env(&mut settings, env_of(&[("PRODUCT_API_BASE", "http://plain:1")]));
    assert_eq!(settings.api_base, "http://plain:1");
}

#[test]
fn unparsable_timeout_is_ignored() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_of(&[("APP__REQUEST_TIMEOUT_SECS", "soon")]),
    );
    assert_eq!(settings.request_timeout_secs, 30);
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        Path::new("catalog.toml"),
        "api_base = \"http://file:9\"\nrequest_timeout_secs = 12\n",
    )
    .expect("parse");
    assert_eq!(settings.api_base, "http://file:9");
    assert_eq!(settings.request_timeout_secs, 12);
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn malformed_file_is_reported_with_its_path() {
    let mut settings = Settings::default();
    let err = apply_file(&mut settings, Path::new("broken.toml"), "api_base = [")
        .expect_err("invalid toml");
    assert!(matches!(err, ConfigError::File { ref path, .. } if path == "broken.toml"));
}

#[test]
fn explicitly_requested_file_must_exist() {
    let missing = std::env::temp_dir().join("catalog-config-missing/catalog.toml");
    let err = load_settings(Some(missing.as_path())).expect_err("missing file");
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn load_settings_reads_the_given_file() {
    let path = temp_config("api_base = \"http://localhost:9000/\"\nlog_filter = \"warn\"\n");
    let settings = load_settings(Some(path.as_path())).expect("load");
    assert_eq!(settings.api_base, "http://localhost:9000");
    assert_eq!(settings.log_filter, "warn");
    let _ = fs::remove_dir_all(path.parent().expect("temp dir"));
}

#[test]
fn zero_timeout_from_env_is_rejected() {
    let mut settings = Settings::default();
    apply_env(&mut settings, env_of(&[("APP__REQUEST_TIMEOUT_SECS", "0")]));
    assert!(matches!(
        check_timeout(&settings),
        Err(ConfigError::ZeroTimeout)
    ));
    assert!(check_timeout(&Settings::default()).is_ok());
}

#[test]
fn zero_timeout_in_file_fails_loading() {
    let path = temp_config("request_timeout_secs = 0\n");
    let err = load_settings(Some(path.as_path())).expect_err("zero timeout");
    assert!(err.to_string().contains("request_timeout_secs"));
    let _ = fs::remove_dir_all(path.parent().expect("temp dir"));
}
