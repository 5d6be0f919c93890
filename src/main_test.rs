use super::*;

static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

fn env_config(close_keeps_focus: bool) -> PanelConfig {
    PanelConfig { close_keeps_focus, ..PanelConfig::default() }
}

#[test]
fn cli_without_flag_keeps_env_close_setting() {
    let cli = Cli::try_parse_from(["artifact-panel"]).unwrap();
    assert!(panel_config(&cli, env_config(true)).close_keeps_focus);
    assert!(!panel_config(&cli, env_config(false)).close_keeps_focus);
}

#[test]
fn cli_flag_turns_close_keeps_focus_on() {
    let cli = Cli::try_parse_from(["artifact-panel", "--close-keeps-focus"]).unwrap();
    assert!(panel_config(&cli, env_config(false)).close_keeps_focus);
}

#[test]
fn cli_flag_is_not_read_from_env() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    // SAFETY: env mutation is serialized by ENV_LOCK within this test binary.
    unsafe { std::env::set_var("ARTIFACT_CLOSE_KEEPS_FOCUS", "yes") };
    let parsed = Cli::try_parse_from(["artifact-panel"]);
    unsafe { std::env::remove_var("ARTIFACT_CLOSE_KEEPS_FOCUS") };

    let cli = parsed.unwrap();
    assert!(!cli.close_keeps_focus);
}

#[test]
fn cli_download_dir_overrides_env() {
    let cli = Cli::try_parse_from(["artifact-panel", "--download-dir", "/tmp/out"]).unwrap();
    let config = panel_config(&cli, PanelConfig::default());
    assert_eq!(config.download_dir, PathBuf::from("/tmp/out"));
}
