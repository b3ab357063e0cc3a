//! JWT minting and verification built on `jsonwebtoken`.

pub mod decoder;
pub mod encoder;
pub mod keys;

pub use decoder::*;
pub use encoder::*;
pub use keys::*;
