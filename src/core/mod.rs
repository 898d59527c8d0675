pub mod board;
pub mod snapshot;
pub mod stats;
pub mod timeline;

pub use crate::domain::model::{Activity, Contact, Deal, DealStage};
pub use crate::domain::ports::{Entity, EntityPort};
pub use crate::utils::error::Result;
