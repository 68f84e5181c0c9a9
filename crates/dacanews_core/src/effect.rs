use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch {
        request_id: RequestId,
        url: String,
        kind: FetchKind,
    },
    /// A newer request superseded this one.
    CancelFetch { request_id: RequestId },
    ShowAlert { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Search,
    Pagination,
}
