// HTTP middleware
pub mod access_gate;

pub use access_gate::*;
