pub mod change_source;
pub mod line_counter;

pub use change_source::ChangeSource;
pub use line_counter::LineCounter;
