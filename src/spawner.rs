use rand::Rng;

use crate::session::{FallingWord, PlayArea};

/// Allocates ids and places new words along the top edge.
///
/// Ids keep counting across restarts, so they are never reused within a
/// session either.
#[derive(Debug, Default)]
pub struct Spawner {
    next_id: u64,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn spawn<R: Rng>(
        &mut self,
        text: String,
        speed: f64,
        area: &PlayArea,
        rng: &mut R,
    ) -> FallingWord {
        let id = self.next_id;
        self.next_id += 1;

        FallingWord {
            id,
            text,
            x: rng.gen_range(0.0..=area.max_x()),
            y: area.spawn_y,
            speed,
        }
    }
}
