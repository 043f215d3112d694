use async_trait::async_trait;

use crate::domain::comparison::{ComparisonContext, ComparisonMode, ComparisonRange};
use crate::domain::record::RawChange;
use crate::error::AppResult;

#[async_trait]
pub trait ChangeSource: Send + Sync {
    /// Resolves the base revision of `mode`.
    async fn range(&self, mode: ComparisonMode) -> AppResult<ComparisonRange>;

    /// Changed paths with their line counts; every entry has at least one changed line.
    async fn changes(&self, range: &ComparisonRange) -> AppResult<Vec<RawChange>>;

    /// Commit metadata for the two endpoints of `range`.
    async fn comparison(&self, range: &ComparisonRange) -> AppResult<ComparisonContext>;
}
