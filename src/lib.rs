pub mod annotation;
pub mod discovery;
pub mod logging;
pub mod output;
pub mod reader;
pub mod splitter;
pub mod validator;

// Re-export the entry points used by the binaries
pub use splitter::{run_split, split_on_dot_space, SplitConfig, SplitOutcome};
pub use validator::{
    run_validation, validate_annotations, ValidationOutcome, ValidationReport, ValidatorConfig,
};
