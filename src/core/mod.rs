pub mod api;
pub mod batch;
pub mod expander;
pub mod export;
pub mod table;

pub use crate::domain::model::{Listing, Page, SkuItem, SyncKind};
pub use crate::domain::ports::{ConfigProvider, ListingApi, StateStore};
pub use crate::utils::error::Result;
