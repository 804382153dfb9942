/// Image persistence for levelmap intensity grids.

pub mod error;
pub mod png;

pub use error::ExportError;
pub use png::{encode_png, write_png};
