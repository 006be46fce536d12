//! Browser adapters for the session core's storage, transport and
//! navigation seams.

pub mod navigator;
pub mod storage;
pub mod transport;
