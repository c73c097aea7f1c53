//! Serial operator console: line assembly, the numbered menu, the interface
//! status table and command dispatch onto the [`NetController`].
//!
//! [`NetController`]: crate::firmware::net::NetController

mod commands;
mod line_reader;
mod menu;
mod parser;
mod session;
mod status;


pub use commands::{MenuCommand, MenuLayout};
pub use line_reader::{ConsoleLineReader, LineReadEvent};
pub use menu::write_menu;
pub use session::MenuSession;
pub use status::write_status;
