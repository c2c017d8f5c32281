pub mod highlight;
pub mod parse;
pub mod path;
pub mod selection;
pub mod table;
pub mod tree;
pub mod value;
