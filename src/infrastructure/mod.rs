pub mod hooks;
pub mod plugins;

pub use hooks::*;
pub use plugins::*;
