//! Domain ports: capability interfaces implemented by outbound adapters.

mod banner_repository;
mod word_service;

pub use banner_repository::{BannerRepository, BannerRepositoryError};
pub use word_service::WordService;

#[cfg(test)]
pub use banner_repository::MockBannerRepository;
#[cfg(test)]
pub use word_service::MockWordService;
