//! RDA Tracker Library
//!
//! Per-gram food catalog, nutrition calculator, RDA progress engine, and the
//! persisted daily log behind the MCP server.

pub mod build_info;
pub mod catalog;
pub mod config;
pub mod db;
pub mod fdc;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
