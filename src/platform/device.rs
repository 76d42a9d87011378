//! User-agent based headset heuristic.
//!
//! First-generation Quest browsers never show the runtime's own "Enter VR" affordance, so the
//! game spawns its own panel there. Quest 2/3 and desktop browsers do not need it.

use bevy::prelude::*;

/// Native builds read the user agent from this variable (handy for testing the panel).
pub const USER_AGENT_ENV: &str = "HOME_RUN_USER_AGENT";

/// `true` for an Oculus/Quest user agent that is not a Quest 2 or Quest 3.
pub fn is_legacy_quest(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    let has_oculus = ua.contains("oculus") || ua.contains("quest");
    has_oculus && !names_quest_2_or_3(&ua)
}

/// Matches `quest2`, `quest 2`, `quest3`, `quest 3` (one optional whitespace character), which
/// also covers `metaquest2` and `meta quest 2`. Expects lowercase input.
fn names_quest_2_or_3(ua: &str) -> bool {
    ua.match_indices("quest").any(|(i, m)| {
        let mut rest = ua[i + m.len()..].chars();
        match rest.next() {
            Some('2' | '3') => true,
            Some(c) if c.is_whitespace() => matches!(rest.next(), Some('2' | '3')),
            _ => false,
        }
    })
}

/// Run a fallible user-agent probe; any probe failure counts as "not a legacy Quest".
pub fn detect_legacy_quest<F>(probe: F) -> bool
where
    F: FnOnce() -> anyhow::Result<String>,
{
    match probe() {
        Ok(ua) => is_legacy_quest(&ua),
        Err(e) => {
            debug!(target: "device", "User agent unavailable ({e}); assuming not a legacy Quest");
            false
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn user_agent() -> anyhow::Result<String> {
    let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    window
        .navigator()
        .user_agent()
        .map_err(|e: wasm_bindgen::JsValue| {
            anyhow::anyhow!("navigator.userAgent: {}", e.as_string().unwrap_or_default())
        })
}

#[cfg(not(target_arch = "wasm32"))]
pub fn user_agent() -> anyhow::Result<String> {
    std::env::var(USER_AGENT_ENV).map_err(|e| anyhow::anyhow!("{USER_AGENT_ENV}: {e}"))
}
