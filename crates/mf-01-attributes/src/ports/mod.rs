//! Ports Layer - capability traits for objects that embed a store

pub mod inbound;

pub use inbound::AttributeHost;
