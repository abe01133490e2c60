pub mod constants;
pub mod engine;
pub mod error;
pub mod interaction;
pub mod signal;
pub mod world;

pub use constants::*;
pub use engine::*;
pub use error::*;
pub use interaction::*;
pub use signal::*;
pub use world::*;
