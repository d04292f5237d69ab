pub mod month_view;
pub mod renderer;
pub mod theme;

pub use month_view::*;
pub use renderer::*;
pub use theme::*;
