// HTTP routes
pub mod health;
pub mod protected;

pub use health::*;
pub use protected::*;
