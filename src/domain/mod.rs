pub mod bounds;
pub mod calendar_date;
pub mod date_range;
pub mod grid;
pub mod notification;
pub mod props;
pub mod selection;

pub use bounds::*;
pub use calendar_date::*;
pub use date_range::*;
pub use grid::*;
pub use notification::*;
pub use props::*;
pub use selection::*;
