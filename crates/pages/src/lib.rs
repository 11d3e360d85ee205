//! Ordered page collection: pull pages out of source documents, reorder or
//! drop them, then merge them back into one document in display order.

mod backend;
mod collection;
mod error;
mod lopdf_backend;
mod notice;

pub use backend::*;
pub use collection::*;
pub use error::*;
pub use lopdf_backend::*;
pub use notice::*;
