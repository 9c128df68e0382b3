mod contact;
mod health_check;
mod waitlist;

pub use contact::*;
pub use health_check::*;
pub use waitlist::*;
