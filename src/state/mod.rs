//! Application state module

mod forms;
mod notification;
mod timer;

pub use forms::*;
pub use notification::*;
pub use timer::*;
