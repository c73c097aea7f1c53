pub mod config;
pub mod console;
pub mod link;
pub mod net;
#[cfg(feature = "esp32-runtime")]
mod runtime;
#[cfg(test)]
pub(crate) mod sim;
pub mod types;

#[cfg(feature = "esp32-runtime")]
pub use runtime::run;
