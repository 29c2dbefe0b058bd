//! Data structures exchanged with the controller.

pub mod network;
