//! Outbound adapters: concrete implementations of the domain ports.

pub mod memory;
pub mod persistence;
pub mod words;

pub use memory::MemoryBannerRepository;
pub use words::ReverseWordService;
