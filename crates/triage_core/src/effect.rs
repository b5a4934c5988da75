use crate::{CategoryFilter, RequestId, Submission};

/// Network work the core asks the platform to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Submit {
        request_id: RequestId,
        submission: Submission,
    },
    FetchHistory {
        request_id: RequestId,
        filter: CategoryFilter,
    },
    FetchHistoryStats {
        request_id: RequestId,
    },
}
