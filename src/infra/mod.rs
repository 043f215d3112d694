pub mod git;
pub mod workspace;
