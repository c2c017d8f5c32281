pub mod backend;

pub use backend::{KeyCode, KeyEvent, KeyModifiers, Terminal, TerminalEvent, TerminalSize};
