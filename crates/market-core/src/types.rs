//! Core domain types for the prediction markets front-end.

pub mod category;
pub mod chain;
pub mod market;
pub mod position;

pub use category::*;
pub use chain::*;
pub use market::*;
pub use position::*;
