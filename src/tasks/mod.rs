//! Background Tasks Module
//!
//! # Tasks
//! - Reaper: removes expired cache entries once per TTL period

mod reaper;

pub(crate) use reaper::spawn_reaper_task;
