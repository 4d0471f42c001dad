pub mod evaluation_flow;

pub use evaluation_flow::{decide_path, EvaluationFlow, EvaluationPath};
