pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::http::RemoteCollection;
pub use crate::adapters::memory::InMemoryCollection;
pub use crate::config::CliConfig;
pub use crate::core::board::{DealBoard, StageChange};
pub use crate::core::snapshot::{load_snapshot, Snapshot};
pub use crate::core::stats::{
    dashboard_stats, pipeline_summary, recent_activity_feed, DashboardStats,
};
pub use crate::core::timeline::{filter_timeline, TimelineFilter};
pub use crate::domain::model::{Activity, ActivityType, Contact, Deal, DealStage};
pub use crate::domain::ports::{Entity, EntityPort};
pub use crate::utils::error::{CrmError, Result};
