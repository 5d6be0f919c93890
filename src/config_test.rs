use super::*;

/// # Safety
/// Env mutation is process-global; every test here holds `ENV_LOCK`.
unsafe fn clear_panel_env() {
    unsafe {
        std::env::remove_var("ARTIFACT_DOWNLOAD_DIR");
        std::env::remove_var("ARTIFACT_COPY_FEEDBACK_MS");
        std::env::remove_var("ARTIFACT_SIDEBAR_MIN");
        std::env::remove_var("ARTIFACT_CLOSE_KEEPS_FOCUS");
    }
}

static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[test]
fn from_env_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe { clear_panel_env() };

    let cfg = PanelConfig::from_env();
    assert_eq!(cfg, PanelConfig::default());
    assert_eq!(cfg.download_dir, PathBuf::from("."));
    assert_eq!(cfg.copy_feedback, Duration::from_millis(2000));
    assert_eq!(cfg.sidebar_min_artifacts, 2);
    assert!(!cfg.close_keeps_focus);
}

#[test]
fn from_env_reads_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_panel_env();
        std::env::set_var("ARTIFACT_DOWNLOAD_DIR", "/tmp/artifacts");
        std::env::set_var("ARTIFACT_COPY_FEEDBACK_MS", "500");
        std::env::set_var("ARTIFACT_SIDEBAR_MIN", "1");
        std::env::set_var("ARTIFACT_CLOSE_KEEPS_FOCUS", "true");
    }

    let cfg = PanelConfig::from_env();
    assert_eq!(cfg.download_dir, PathBuf::from("/tmp/artifacts"));
    assert_eq!(cfg.copy_feedback, Duration::from_millis(500));
    assert_eq!(cfg.sidebar_min_artifacts, 1);
    assert!(cfg.close_keeps_focus);

    unsafe { clear_panel_env() };
}

#[test]
fn from_env_ignores_unparseable_values() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_panel_env();
        std::env::set_var("ARTIFACT_COPY_FEEDBACK_MS", "soon");
        std::env::set_var("ARTIFACT_CLOSE_KEEPS_FOCUS", "yes");
        std::env::set_var("ARTIFACT_DOWNLOAD_DIR", "   ");
    }

    let cfg = PanelConfig::from_env();
    assert_eq!(cfg.copy_feedback, Duration::from_millis(DEFAULT_COPY_FEEDBACK_MS));
    assert!(!cfg.close_keeps_focus);
    assert_eq!(cfg.download_dir, PathBuf::from(DEFAULT_DOWNLOAD_DIR));

    unsafe { clear_panel_env() };
}

#[test]
fn env_parse_trims_whitespace() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe { std::env::set_var("ARTIFACT_SIDEBAR_MIN", " 3 ") };
    assert_eq!(env_parse("ARTIFACT_SIDEBAR_MIN", 0usize), 3);
    unsafe { clear_panel_env() };
}
