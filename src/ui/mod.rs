pub mod editor;
pub mod layout;
pub mod scroll;
pub mod source_pane;
pub mod span;
pub mod style;
pub mod table_pane;
pub mod theme;
pub mod tree_pane;
