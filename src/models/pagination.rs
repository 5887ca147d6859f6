//! 分页相关的数据结构

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PaginationParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl PaginationParams {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> u64 {
        self.page_size.unwrap_or(20).clamp(1, 100)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: u64, page_size: u64, total: u64) -> Self {
        let total_pages = if total == 0 {
            1
        } else {
            (total + page_size - 1) / page_size
        };
        Self {
            data,
            page,
            page_size,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_params_defaults() {
        let params = PaginationParams {
            page: None,
            page_size: None,
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size(), 20);
    }

    #[test]
    fn test_pagination_params_clamped() {
        let params = PaginationParams {
            page: Some(0),
            page_size: Some(10_000),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size(), 100);
    }

    #[test]
    fn test_total_pages() {
        let resp = PaginatedResponse::new(vec![1, 2, 3], 1, 10, 25);
        assert_eq!(resp.total_pages, 3);
        let empty: PaginatedResponse<i32> = PaginatedResponse::new(vec![], 1, 10, 0);
        assert_eq!(empty.total_pages, 1);
    }
}
