//! Sitedraft: Website Drafts from a One-Line Description
//!
//! Turns a short business description into a mock marketing website draft (copy,
//! color palette, sections) plus a generated hero image. Generation runs as a
//! two-stage pipeline: the text stage is required, the image stage degrades to a
//! placeholder when it fails.

pub mod asset;
pub mod cli;
pub mod config;
pub mod draft;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod provider;
