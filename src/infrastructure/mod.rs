pub mod oracle;

pub use oracle::{OpenAiOracle, Oracle};
