use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::handler::Result;

/// Default number of items returned by listings without a comment policy.
pub const DEFAULT_LIST_LIMIT: u32 = 100;

/// Query parameters shared by listing endpoints.
#[must_use]
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct ListParams {
    /// Maximum number of items to return (1 to 1000).
    pub limit: Option<u32>,
}

impl ListParams {
    /// Returns the requested limit, or [`DEFAULT_LIST_LIMIT`] when absent.
    pub fn resolve_limit(self) -> Result<u32> {
        Ok(savor_core::resolve_limit(self.limit, DEFAULT_LIST_LIMIT)?)
    }
}

#[cfg(test)]
mod tests {
    use savor_core::MAX_LIST_LIMIT;

    use super::*;
    use crate::handler::ErrorKind;

    #[test]
    fn limit_defaults_and_bounds() -> anyhow::Result<()> {
        assert_eq!(ListParams::default().resolve_limit()?, DEFAULT_LIST_LIMIT);
        assert_eq!(ListParams { limit: Some(7) }.resolve_limit()?, 7);

        for limit in [0, MAX_LIST_LIMIT + 1] {
            let error = ListParams { limit: Some(limit) }.resolve_limit().unwrap_err();
            assert_eq!(error.kind(), ErrorKind::BadRequest);
            assert_eq!(error.message(), Some("limit must be between 1 and 1000"));
        }
        Ok(())
    }
}
