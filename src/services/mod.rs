pub mod chunker;
pub mod combiner;
pub mod fallback;
pub mod judge_service;
pub mod prompt_builder;
pub mod response_parser;

pub use chunker::{chunk_code_content, chunk_summary, chunk_text};
pub use combiner::combine_chunk_results;
pub use fallback::fallback_scores;
pub use judge_service::JudgeService;
pub use response_parser::parse_response;
