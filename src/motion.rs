use crate::session::{FallingWord, MissPolicy, Phase, PlayArea, SessionState};

/// What one motion tick did to the session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub missed: Vec<FallingWord>,
    pub lives_lost: u32,
    pub game_over: bool,
}

/// Move every word down by its speed and pull out the ones below `floor`.
/// A word sitting exactly on the floor is still in play.
pub fn advance_words(words: &mut Vec<FallingWord>, floor: f64) -> Vec<FallingWord> {
    for word in words.iter_mut() {
        word.y += word.speed;
    }

    let (kept, missed): (Vec<_>, Vec<_>) = std::mem::take(words)
        .into_iter()
        .partition(|w| w.y <= floor);
    *words = kept;
    missed
}

/// One tick of the motion engine. Ends the run (recording `now_ms` as its
/// end) in the same tick that lives reach zero.
pub fn motion_tick(
    state: &mut SessionState,
    area: &PlayArea,
    policy: MissPolicy,
    now_ms: f64,
) -> TickOutcome {
    if state.phase != Phase::Running {
        return TickOutcome::default();
    }

    let missed = advance_words(&mut state.active_words, area.height);
    if missed.is_empty() {
        return TickOutcome::default();
    }

    let lives_lost = policy.lives_lost(missed.len()).min(state.lives);
    state.lives -= lives_lost;

    let game_over = state.lives == 0;
    if game_over {
        state.phase = Phase::Over;
        state.ended_at_ms = Some(now_ms);
    }

    TickOutcome {
        missed,
        lives_lost,
        game_over,
    }
}
