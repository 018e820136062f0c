//! Upstream operations and their endpoints.

use std::fmt;

/// The remote calls the client knows how to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Search,
    GetPage,
    ListEditRequests,
}

impl Operation {
    /// Path of the endpoint, relative to the configured base URL.
    pub fn path(self) -> &'static str {
        match self {
            Operation::Search => "/api/full-text-search",
            Operation::GetPage => "/api/page",
            Operation::ListEditRequests => "/api/list-edit-requests-by-slug",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::Search => "search",
            Operation::GetPage => "get_page",
            Operation::ListEditRequests => "list_edit_requests",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Operation::Search.path(), "/api/full-text-search");
        assert_eq!(Operation::GetPage.path(), "/api/page");
        assert_eq!(
            Operation::ListEditRequests.path(),
            "/api/list-edit-requests-by-slug"
        );
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(Operation::GetPage.to_string(), "get_page");
    }
}
