//! ESP32 board bindings: the link traits on `esp-radio` and `embassy-net`,
//! the pacer on the embassy timer, and the tasks that run them.

mod bootstrap;
mod cloud;
mod console;
mod pacer;
mod probe;
mod radio;

pub use bootstrap::run;
