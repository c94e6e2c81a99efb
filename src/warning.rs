use std::fmt;

/// Non-fatal conditions the workflow reports before continuing or asking the
/// operator how to proceed.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowWarning {
    /// Commit was requested with an empty index; the runner stages everything
    /// first.
    NothingStaged,
    /// The tag already exists locally and must be deleted to be recreated.
    TagAlreadyExists { tag: String },
}

impl fmt::Display for WorkflowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowWarning::NothingStaged => {
                write!(f, "Nothing staged, staging all working tree changes first")
            }
            WorkflowWarning::TagAlreadyExists { tag } => {
                write!(f, "Tag '{}' already exists locally", tag)
            }
        }
    }
}
