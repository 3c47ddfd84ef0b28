//! Types that represent the core data model, such as `Deal`, `Basket` and `Amount`.
mod amount;
mod basket;
mod budget;
mod deal;
mod names;
mod session;

pub use amount::{Amount, AmountError};
pub use basket::{Basket, Toggle};
pub use budget::BudgetTracker;
pub use deal::{Deal, PickedItem, DEFAULT_UNIT};
pub use names::{ItemNames, TOKEN_KEY_DELIMITER};
pub use session::Session;
