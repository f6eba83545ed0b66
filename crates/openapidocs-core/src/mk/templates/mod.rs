//! Tera templates of the output styles.
//!
//! Every style has a `layout.html` entry template and may include partials
//! (`partial/info.html`, ...). A custom templates directory can replace any of
//! them.

pub mod builtin;
pub mod dir;
pub mod style;
pub mod writer;

pub use dir::*;
pub use style::*;
pub use writer::*;
