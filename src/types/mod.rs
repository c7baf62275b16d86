//! Data types shared by layout and rendering.

mod border;
mod canvas;
mod document;

pub use border::*;
pub use canvas::*;
pub use document::*;
