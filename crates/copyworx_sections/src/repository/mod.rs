//! Session repository implementations.

mod file;
mod in_memory;

pub use file::FileSessionRepository;
pub use in_memory::InMemorySessionRepository;
