mod address;
mod client;
mod coerce;
mod connection;
mod introspect;

pub use address::{parse as parse_address, Address};
pub use client::call;
