//! Cron jobs that keep stored data tidy.

pub mod maintenance;
