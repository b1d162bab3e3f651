pub mod anim;
pub mod celebration;
pub mod config;
pub mod constants;
pub mod diorama;
pub mod error;
pub mod frame;
pub mod orbit;
pub mod pick;
pub mod scene;
pub mod schedule;
pub mod snow;
pub mod state;
pub mod tunables;

pub use celebration::*;
pub use config::*;
pub use constants::*;
pub use diorama::*;
pub use error::*;
pub use frame::*;
pub use state::*;
