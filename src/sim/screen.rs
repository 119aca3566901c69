//! Screen state machine
//!
//! Pausing is only legal during an active run; the machine remembers which
//! state it paused from so resume returns there.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenState {
    Title,
    Countdown,
    Playing,
    Paused,
    GameOver,
}

/// Result of a pause toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseTransition {
    pub next_state: ScreenState,
    /// Only ever `Countdown` or `Playing`; cleared on resume.
    pub paused_from: Option<ScreenState>,
}

/// The only legal pause/resume protocol.
///
/// - `Paused` resumes to the remembered source (defaulting to `Playing`).
/// - `Countdown`/`Playing` pause, recording the source.
/// - `Title`/`GameOver` ignore the toggle.
pub fn toggle_pause_state(
    current: ScreenState,
    paused_from: Option<ScreenState>,
) -> PauseTransition {
    match current {
        ScreenState::Paused => PauseTransition {
            next_state: paused_from.unwrap_or(ScreenState::Playing),
            paused_from: None,
        },
        ScreenState::Countdown | ScreenState::Playing => PauseTransition {
            next_state: ScreenState::Paused,
            paused_from: Some(current),
        },
        ScreenState::Title | ScreenState::GameOver => PauseTransition {
            next_state: current,
            paused_from,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pauses_from_countdown_and_resumes_back() {
        let paused = toggle_pause_state(ScreenState::Countdown, None);
        assert_eq!(paused.next_state, ScreenState::Paused);
        assert_eq!(paused.paused_from, Some(ScreenState::Countdown));

        let resumed = toggle_pause_state(paused.next_state, paused.paused_from);
        assert_eq!(resumed.next_state, ScreenState::Countdown);
        assert_eq!(resumed.paused_from, None);
    }

    #[test]
    fn pauses_from_playing() {
        let paused = toggle_pause_state(ScreenState::Playing, None);
        assert_eq!(paused.next_state, ScreenState::Paused);
        assert_eq!(paused.paused_from, Some(ScreenState::Playing));
    }

    #[test]
    fn resume_without_memory_defaults_to_playing() {
        let resumed = toggle_pause_state(ScreenState::Paused, None);
        assert_eq!(resumed.next_state, ScreenState::Playing);
        assert_eq!(resumed.paused_from, None);
    }

    #[test]
    fn title_and_game_over_ignore_pause() {
        let title = toggle_pause_state(ScreenState::Title, None);
        assert_eq!(title.next_state, ScreenState::Title);
        assert_eq!(title.paused_from, None);

        let over = toggle_pause_state(ScreenState::GameOver, None);
        assert_eq!(over.next_state, ScreenState::GameOver);
    }
}
