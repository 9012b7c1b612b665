pub mod cancel;
mod error;
mod service;
mod wire;

pub use error::ShellError;
pub use service::{argv_of, build_params, input_of, Registry, RegistryBuilder};
pub use wire::{Call, Reply};
