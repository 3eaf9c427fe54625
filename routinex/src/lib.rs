//! RoutineX library
//!
//! Local data layer for the RoutineX habit and task tracker: task and habit
//! stores, the daily completion roll-up and the monthly report.

pub mod app;
pub mod commands;
pub mod config;
pub mod database;
pub mod error;
pub mod services;
