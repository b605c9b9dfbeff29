//! Input handling module

pub mod file_reader;
pub mod glob_resolver;
pub mod records;
pub mod reference;

pub use file_reader::FileReader;
pub use glob_resolver::resolve_patterns;
pub use records::RecordSet;
pub use reference::load_reference;
