//! Integration tests for sitedraft

mod cli_generate;
mod config_integration;
mod gemini_pipeline;
mod orchestrator_lifecycle;
