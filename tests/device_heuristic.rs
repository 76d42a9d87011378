use home_run_derby::platform::device::{detect_legacy_quest, is_legacy_quest};

#[test]
fn first_generation_quest_is_legacy() {
    assert!(is_legacy_quest("Mozilla/5.0 (Oculus Quest)"));
    assert!(is_legacy_quest(
        "Mozilla/5.0 (X11; Linux x86_64; Quest) AppleWebKit/537.36 OculusBrowser/15.0"
    ));
}

#[test]
fn newer_quests_and_other_browsers_are_not() {
    assert!(!is_legacy_quest("Mozilla/5.0 (Quest 2)"));
    assert!(!is_legacy_quest("Mozilla/5.0 (Quest 3)"));
    assert!(!is_legacy_quest(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120.0"
    ));
    assert!(!is_legacy_quest(""));
}

#[test]
fn probe_failure_counts_as_not_legacy() {
    assert!(!detect_legacy_quest(|| anyhow::bail!("navigator unavailable")));
    assert!(detect_legacy_quest(|| Ok("oculus quest".to_string())));
}
