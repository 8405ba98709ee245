pub mod artifact;
pub mod change;
pub mod error;

pub use artifact::{ArtifactCommit, CommitChangeStats, FileInfo, FileSummaryArtifact, SummaryTotals};
pub use change::{
    Addition, CommitChange, CommitRecord, Deletion, DiffResult, FileChangeReport, LineChange,
};
pub use error::{IoResultExt, Result, YearError};
