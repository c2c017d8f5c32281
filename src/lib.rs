pub mod app;
pub mod core;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use core::highlight;
pub use core::parse;
pub use core::path;
pub use core::selection;
pub use core::table;
pub use core::tree;
pub use core::value;
pub use ui::theme;
