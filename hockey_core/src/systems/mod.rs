pub mod input;
pub mod movement;
pub mod physics;
pub mod scoring;
pub mod triggers;

pub use input::*;
pub use movement::*;
pub use physics::*;
pub use scoring::*;
pub use triggers::*;
