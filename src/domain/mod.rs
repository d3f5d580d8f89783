mod balance;
mod entry;
mod lifecycle;
mod money;
mod user;
mod validation;

pub use balance::*;
pub use entry::*;
pub use lifecycle::*;
pub use money::*;
pub use user::*;
pub use validation::*;
