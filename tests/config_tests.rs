// Configuration loading tests

use std::time::Duration;

use aura_client::Config;

#[test]
fn test_load_config_from_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("aura-client.toml");
    std::fs::write(
        &path,
        r#"
[service]
name = "aura-client"

[server]
url = "ws://assistant.internal:9001"
reconnect_delay_ms = 1500

[capture]
period_ms = 250
jpeg_quality = 85
width = 320
height = 240
"#,
    )
    .unwrap();

    // The loader resolves the extension itself.
    let stem = dir.path().join("aura-client");
    let config = Config::load(stem.to_str().unwrap()).unwrap();

    assert_eq!(config.service.name, "aura-client");
    assert_eq!(config.server.url, "ws://assistant.internal:9001");
    assert_eq!(config.server.reconnect_delay_ms, 1500);
    assert_eq!(config.capture.period_ms, 250);
    assert_eq!(config.capture.jpeg_quality, 85);
    assert_eq!(config.capture.width, 320);
    assert_eq!(config.capture.height, 240);
}

#[test]
fn test_session_settings_derive_from_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("aura-client.toml"),
        r#"
[service]
name = "aura-client"

[server]
url = "ws://assistant.internal:9001"
reconnect_delay_ms = 1500

[capture]
period_ms = 250
jpeg_quality = 85
width = 320
height = 240
"#,
    )
    .unwrap();

    let stem = dir.path().join("aura-client");
    let config = Config::load(stem.to_str().unwrap()).unwrap();
    let session = config.session();

    assert_eq!(session.server_url, "ws://assistant.internal:9001");
    assert_eq!(session.capture_period, Duration::from_millis(250));
    assert_eq!(session.jpeg_quality, 85);
    assert_eq!(session.reconnect_delay, Duration::from_millis(1500));
    assert_eq!(
        session.endpoint(),
        format!("ws://assistant.internal:9001/ws/emotion/{}", session.client_id)
    );
}

#[test]
fn test_missing_file_is_an_error_but_load_or_default_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no-such-config");
    let missing = missing.to_str().unwrap();

    assert!(Config::load(missing).is_err());

    let config = Config::load_or_default(missing);
    assert_eq!(config.server.url, "ws://localhost:8000");
    assert_eq!(config.server.reconnect_delay_ms, 3000);
    assert_eq!(config.capture.period_ms, 1000);
    assert_eq!(config.capture.jpeg_quality, 70);
}

#[test]
fn test_malformed_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    // Missing whole [server] and [capture] tables.
    std::fs::write(
        dir.path().join("partial.toml"),
        "[service]\nname = \"aura-client\"\n",
    )
    .unwrap();

    let stem = dir.path().join("partial");
    assert!(Config::load(stem.to_str().unwrap()).is_err());
}
