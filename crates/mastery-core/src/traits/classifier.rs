use async_trait::async_trait;

use crate::errors::MasteryResult;
use crate::models::Classification;

/// Subject/concept oracle collaborator.
///
/// The oracle's output is semi-structured text; implementations must parse
/// it defensively and return `Subject::General` with no concept name on any
/// parse or format deviation rather than erroring. Only transport failures
/// (network, HTTP status) surface as `Err`; the pipeline degrades those to
/// `General` at its boundary.
#[async_trait]
pub trait IConceptClassifier: Send + Sync {
    async fn classify(&self, message: &str) -> MasteryResult<Classification>;
}
