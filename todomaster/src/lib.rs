//! `TodoMaster` library: task store, persistence, session, and terminal UI.

pub mod app;
pub mod config;
pub mod session;
pub mod storage;
pub mod store;
pub mod ui;
