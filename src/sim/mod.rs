//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One [`tick`] per frame, driven by elapsed milliseconds
//! - Seeded RNG only, owned by the session
//! - Stable iteration order (creation order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod enemy;
pub mod obstacles;
pub mod player;
pub mod projectile;
pub mod state;
pub mod tick;
pub mod wave;
pub mod weapon;

pub use collision::Aabb;
pub use enemy::{Enemy, Neighbor, SideOrder, Steer, SteerOutcome, Tint};
pub use obstacles::ObstacleField;
pub use player::{MoveIntent, Player};
pub use projectile::Projectile;
pub use state::{EnemyView, GameEvent, GameState, SessionPhase, Snapshot};
pub use tick::{TickInput, tick};
pub use wave::{WaveController, WaveOutcome};
pub use weapon::{FireOutcome, Weapon};
