//! Partitioner abstraction for consistent hashing.
//!
//! Partitioners are responsible for converting keys into tokens
//! that can be placed on the hash ring.

pub mod digest;
pub mod func;
pub mod sip;
pub mod string_hash;
pub mod traits;
pub mod xxh3;

pub use digest::Blake3Partitioner;
pub use func::FnPartitioner;
pub use sip::SipPartitioner;
pub use string_hash::StringHashPartitioner;
pub use traits::Partitioner;
pub use xxh3::Xxh3Partitioner;
