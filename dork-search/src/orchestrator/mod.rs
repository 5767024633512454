//! Harvest orchestration: per-backend pagination and multi-backend union.
//!
//! A [`harvest::MultiBackendHarvester`] runs one
//! [`paginate::PaginatedFetcher`] per backend concurrently under a shared
//! request gate, then unions the per-backend [`result_set::ResultSet`]s.

pub mod harvest;
pub mod paginate;
pub mod result_set;
