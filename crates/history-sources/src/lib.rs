pub mod error;
pub mod json_file;
pub mod memory;
pub mod traits;

pub use error::SourceError;
pub use json_file::JsonFileSource;
pub use memory::InMemorySource;
pub use traits::HistorySource;
