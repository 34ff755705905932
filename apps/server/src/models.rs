//! Response envelope types shared by the API handlers.

use serde::Serialize;

use pocketledger_core::pagination::Paginated;

/// Success envelope: `{success: true, message?, data}`.
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        ApiResponse {
            success: true,
            message: None,
            data,
        }
    }

    pub fn with_message(message: &str, data: T) -> Self {
        ApiResponse {
            success: true,
            message: Some(message.to_string()),
            data,
        }
    }
}

/// List envelope: the success envelope plus pagination bookkeeping
/// (`count` is the number of items on this page).
#[derive(Serialize)]
pub struct ListResponse<T: Serialize> {
    pub success: bool,
    pub count: i64,
    pub total: i64,
    pub page: i64,
    pub pages: i64,
    pub data: T,
}

impl<T: Serialize> ListResponse<T> {
    /// Wraps a page; `wrap` names the resource key, e.g.
    /// `{"transactions": [...]}`.
    pub fn from_page<U: Serialize>(
        page: Paginated<U>,
        wrap: impl FnOnce(Vec<U>) -> T,
    ) -> Self {
        ListResponse {
            success: true,
            count: page.count(),
            total: page.total,
            page: page.page,
            pages: page.pages,
            data: wrap(page.data),
        }
    }
}
