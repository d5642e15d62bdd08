//! Timesheet and pay engine
//!
//! This crate records employee shifts and turns them into pay: employees
//! clock in with a workload level and clock out with a break, and each shift
//! is paid as worked hours times the hourly rate snapshotted at clock-in times
//! the workload multiplier. Admins and managers get company-wide dashboards
//! and can change hourly rates, with every change audited.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
