pub mod cursor;
pub mod output;
