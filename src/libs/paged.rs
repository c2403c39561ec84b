//! Page requests and page metadata for activity listings.

use crate::libs::activity::Activity;
use serde::Serialize;

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u32,
    pub size: u32,
}

impl PageParams {
    pub fn new(page: u32, size: u32) -> Self {
        PageParams { page, size }
    }

    pub fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }

    /// Describes this page within a result of `total` elements.
    pub fn page_of_total(&self, total: u64) -> Page {
        let total_pages = if self.size == 0 { 0 } else { total.div_ceil(self.size as u64) };
        Page {
            size: self.size,
            number: self.page,
            total_elements: total,
            total_pages,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub size: u32,
    pub number: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl Page {
    pub fn is_last(&self) -> bool {
        self.number as u64 + 1 >= self.total_pages
    }
}

/// One page of activities together with its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivitiesPage {
    pub activities: Vec<Activity>,
    pub page: Page,
}
