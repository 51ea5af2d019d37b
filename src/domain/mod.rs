mod balance;
mod money;
mod purchase;

pub use balance::*;
pub use money::*;
pub use purchase::*;
