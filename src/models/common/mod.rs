pub mod pagination;
pub mod response;

pub use pagination::{PaginatedResponse, PaginationInfo, PaginationQuery, SortOrder};
pub use response::ApiResponse;
