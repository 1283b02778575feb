//! Memory backend port.
//!
//! The backend (Cognee or a stand-in) owns embeddings, vector indexing and
//! graph construction. This layer only sees three capabilities: add content,
//! rebuild the index, and query it.

pub mod box_backend;
pub mod provider;

pub use box_backend::BoxMemoryBackend;
pub use provider::MemoryBackend;
