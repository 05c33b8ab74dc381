//! Business logic services.

pub mod assignment;
pub mod review;

pub use review::ReviewService;
