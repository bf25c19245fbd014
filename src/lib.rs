//! Predicts how well autonomous AI coding agents can comprehend and modify
//! a source repository: a seven-category static + dynamic analysis
//! pipeline that produces a 1-10 composite "Agent Readiness Score" with a
//! tier label and ranked improvement recommendations.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod core;
pub mod discovery;
pub mod errors;
pub mod observability;
pub mod parsing;
pub mod pipeline;
pub mod recommend;
pub mod report;
pub mod scoring;
