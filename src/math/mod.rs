pub mod interp;

pub use interp::{interp, InterpMode};
