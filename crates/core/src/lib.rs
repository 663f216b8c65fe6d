//! Progression-economy engine. Keep this crate free of IO and platform concerns.

pub mod attributes;
pub mod catalog;
pub mod config;
pub mod enchant;
pub mod equip;
pub mod events;
pub mod forge;
pub mod power;
pub mod rng;
pub mod state;

pub use attributes::*;
pub use catalog::*;
pub use config::*;
pub use enchant::*;
pub use equip::*;
pub use events::*;
pub use forge::*;
pub use power::*;
pub use rng::*;
pub use state::*;
