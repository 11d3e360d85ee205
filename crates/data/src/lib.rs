//! Data loading and validation for game rules and the joker catalog.

pub mod load;
pub mod schema;

pub use load::*;
pub use schema::*;
