//! Static content for the progression engine: directory-based JSON loaders
//! plus the built-in tables the game ships with.

pub mod builtin;
pub mod load;

pub use builtin::*;
pub use load::*;
