pub mod collect;
pub mod parse;
pub mod scan;
pub mod timezone;
pub mod write;
