//! docgen: extract documentation from `/*: ... */` comment blocks.
//!
//! Sources are tokenized and parsed block by block into one shared
//! [`model::DocumentModel`]; a [`render::Renderer`] then turns the finished
//! model into output pages.
//!
//! ```text
//! /*: Function: Widget::draw #paint
//!     Paints the widget.
//!     Returns: nothing.
//! */
//! void draw(Canvas& c);
//! ```

pub mod error;
pub mod model;
pub mod parser;
pub mod render;

pub use error::{DocGenError, SyntaxError};
pub use model::DocumentModel;
pub use parser::{parse_file, parse_source};
