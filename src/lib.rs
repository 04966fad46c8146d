//! Gitscribe: interactively filter a Git repository's commit history by
//! author and branch scope, preview the result, and export it to CSV or a
//! styled Excel workbook.
//!
//! # Architecture
//!
//! - **git**: history resolver over the `git` executable
//! - **session**: the state machine driving screens and completions
//! - **commands**: orchestrator turning commands into tokio tasks
//! - **export**: CSV and workbook writers
//! - **ui** / **theme**: ratatui render projection

pub mod commands;
pub mod config;
pub mod export;
pub mod git;
pub mod models;
pub mod session;
pub mod theme;
pub mod ui;
