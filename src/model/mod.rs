//! Pure data structures: the menu, orders and the read-only views over them.

pub mod currency;
pub mod fixtures;
pub mod menu;
pub mod order;
pub mod stats;

pub use currency::*;
pub use fixtures::*;
pub use menu::*;
pub use order::*;
pub use stats::*;
