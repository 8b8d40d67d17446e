//! Payroll deduction calculator for construction site workers.
//!
//! This crate computes the deduction total and net pay of a worker's
//! payroll record from its taxes and per-category insurance amounts, drives
//! the view/edit lifecycle of a record, and talks to the site administration
//! REST API that stores payroll records.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
