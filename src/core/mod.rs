//! Engine core: errors, player identity, deterministic RNG, and the
//! cached/undoable game-state contract.

pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use error::EngineError;
pub use player::PlayerId;
pub use rng::{GameRng, GameRngState};
pub use state::{fx_hash, GameState, StateCaches};
