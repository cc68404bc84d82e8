//! Data model shared by the vellum crates: dynamically typed values and the
//! data context templates render against.

pub mod context;
pub mod error;
pub mod value;

pub use context::DataContext;
pub use error::DataError;
pub use value::{Value, ValueKind};
