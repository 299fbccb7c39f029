//! Domain models for the Stockscan ledger

mod movement;
mod product;
mod report;
mod sale;

pub use movement::*;
pub use product::*;
pub use report::*;
pub use sale::*;
