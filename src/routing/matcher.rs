//! Segment-wise route pattern matching.
//!
//! A pattern is a `/`-separated list of literal segments and `:name`
//! wildcards. A wildcard accepts any single non-empty path segment; the
//! captured value is not returned, callers re-parse the path when they need
//! it (see [`path_id`]).

use crate::error::{AppError, AppResult};
use actix_web::HttpRequest;

fn segments(s: &str) -> Vec<&str> {
    let trimmed = s.strip_prefix('/').unwrap_or(s);
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('/').collect()
}

/// Returns true when `path` has the same number of segments as `pattern`
/// and every literal segment of `pattern` matches exactly.
pub fn matches(pattern: &str, path: &str) -> bool {
    let pattern_parts = segments(pattern);
    let path_parts = segments(path);

    if pattern_parts.len() != path_parts.len() {
        return false;
    }

    pattern_parts
        .iter()
        .zip(path_parts.iter())
        .all(|(pattern_part, path_part)| {
            if pattern_part.starts_with(':') {
                !path_part.is_empty()
            } else {
                pattern_part == path_part
            }
        })
}

/// Reads the record id from the last segment of the request path
/// (`/brands/42` -> 42, `/products/7/history` is handled by [`path_segment_id`]).
pub fn path_id(req: &HttpRequest) -> AppResult<i64> {
    let path = req.path().trim_end_matches('/');
    let last = path.rsplit('/').next().unwrap_or("");
    parse_id(last)
}

/// Reads the record id at segment `index` (zero-based, leading slash ignored).
pub fn path_segment_id(req: &HttpRequest, index: usize) -> AppResult<i64> {
    let parts = segments(req.path());
    let raw = parts.get(index).copied().unwrap_or("");
    parse_id(raw)
}

fn parse_id(raw: &str) -> AppResult<i64> {
    if raw.is_empty() {
        return Err(AppError::ValidationError("ID is required".to_string()));
    }
    raw.parse::<i64>()
        .map_err(|_| AppError::ValidationError(format!("Invalid ID: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_wildcard_matches_single_segment() {
        assert!(matches("/brands/:id", "/brands/42"));
        assert!(matches("/a/:x/c", "/a/b/c"));
    }

    #[test]
    fn test_segment_count_must_match() {
        assert!(!matches("/brands/:id", "/brands/42/extra"));
        assert!(!matches("/brands/:id", "/brands"));
    }

    #[test]
    fn test_literal_segments_must_match() {
        assert!(!matches("/brands/:id", "/brand/42"));
        assert!(!matches("/a/:x/c", "/a/b/d"));
        assert!(!matches("/Brands/:id", "/brands/42"));
    }

    #[test]
    fn test_wildcard_rejects_empty_segment() {
        assert!(!matches("/brands/:id", "/brands/"));
        assert!(!matches("/a/:x/c", "/a//c"));
    }

    #[test]
    fn test_empty_path_has_no_segments() {
        assert!(matches("", ""));
        assert!(matches("/", ""));
        assert!(!matches("/:id", ""));
    }

    #[test]
    fn test_no_url_decoding() {
        assert!(!matches("/a b", "/a%20b"));
        assert!(matches("/a/:x", "/a/%20"));
    }

    #[test]
    fn test_path_id() {
        let req = TestRequest::with_uri("/brands/42").to_http_request();
        assert_eq!(path_id(&req).unwrap(), 42);

        let req = TestRequest::with_uri("/brands/abc").to_http_request();
        assert!(matches!(path_id(&req), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_path_segment_id() {
        let req = TestRequest::with_uri("/products/7/history").to_http_request();
        assert_eq!(path_segment_id(&req, 1).unwrap(), 7);
        assert!(path_segment_id(&req, 5).is_err());
    }
}
