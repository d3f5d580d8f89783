// Application layer - orchestration on top of the domain rules.
// Services own no state between calls; everything goes through the repositories.

mod balance;
pub mod error;
mod service;
mod users;

pub use balance::*;
pub use error::*;
pub use service::*;
pub use users::*;
