//! Small service abstractions shared by the storage layer.

pub mod hash;
