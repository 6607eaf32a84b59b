//! Common types used across the application.

pub mod id;
pub mod money;
pub mod pagination;

pub use id::*;
pub use money::{CENT_SCALE, DebitCredit};
pub use pagination::{PageMeta, PageRequest, PageResponse};

#[cfg(test)]
mod id_tests;
#[cfg(test)]
mod money_tests;
#[cfg(test)]
mod pagination_tests;
