//! The tournament bracket and standings engine: domain types and pure
//! algorithms, free of I/O and async. Storage adapters plan mutations with
//! these modules and apply what they decide.

pub mod advancement;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod pairing;
pub mod scoring;
pub mod standings;
