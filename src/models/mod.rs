pub mod chunk;
pub mod loaders;
pub mod rubric;
pub mod submission;
pub mod submission_view;

pub use chunk::Chunk;
pub use loaders::{load_all_requests, load_request};
pub use rubric::{Dimension, RubricResult, ScoreSource};
pub use submission::{Criterion, EvaluationRequest, Hackathon, Submission};
pub use submission_view::SubmissionView;
