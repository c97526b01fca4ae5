//! Static crate/box field
//!
//! Generated once per episode. No two boxes overlap and none overlaps the
//! player's spawn box.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, overlaps_any};
use crate::consts::OBSTACLE_ATTEMPTS;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    boxes: Vec<Aabb>,
}

impl ObstacleField {
    /// Empty arena
    pub fn empty() -> Self {
        Self::default()
    }

    /// Use these boxes as-is (tests, hand-made layouts)
    pub fn from_boxes(boxes: Vec<Aabb>) -> Self {
        Self { boxes }
    }

    /// Scatter up to `count` square boxes of side `size` on integer coordinates.
    ///
    /// Each box gets [`OBSTACLE_ATTEMPTS`] placement tries; a box that never
    /// fits is dropped, so the field may hold fewer than `count`.
    pub fn generate<R: Rng + ?Sized>(
        count: u32,
        size: f32,
        arena_width: f32,
        arena_height: f32,
        player_spawn: &Aabb,
        rng: &mut R,
    ) -> Self {
        let max_x = (arena_width - size).max(0.0) as i32;
        let max_y = (arena_height - size).max(0.0) as i32;
        let mut boxes: Vec<Aabb> = Vec::with_capacity(count as usize);

        for _ in 0..count {
            let placed = (0..OBSTACLE_ATTEMPTS).find_map(|_| {
                let x = rng.random_range(0..=max_x) as f32;
                let y = rng.random_range(0..=max_y) as f32;
                let candidate = Aabb::new(x, y, size, size);
                let blocked = candidate.intersects(player_spawn) || overlaps_any(&candidate, &boxes);
                (!blocked).then_some(candidate)
            });

            match placed {
                Some(b) => boxes.push(b),
                None => log::warn!("No room for obstacle {} after {} attempts", boxes.len() + 1, OBSTACLE_ATTEMPTS),
            }
        }

        log::debug!("Generated {} obstacles", boxes.len());
        Self { boxes }
    }

    pub fn boxes(&self) -> &[Aabb] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}
