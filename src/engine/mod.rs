pub mod agent;
pub mod error;
pub mod grading_parser;
pub mod llm_client;
pub mod prompt_builder;
