//! Route matching logic.
//!
//! # Responsibilities
//! - Compile a full route path into literal and dynamic segments
//! - Match a pathname against a compiled pattern, extracting params
//! - Search the route tree depth-first, pre-order, first match wins
//!
//! # Design Decisions
//! - Anchored: segment counts must be equal, no prefix matches
//! - A `:name` segment captures exactly one non-empty pathname segment
//! - Segment count mismatch rejects the route and the search continues
//! - Literal comparison is case-sensitive
//! - No regex; matching is a lock-step walk over segments

use crate::routing::path::full_path;
use crate::routing::route::Route;
use crate::routing::Params;

/// One segment of a compiled route path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled, anchored route path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a normalized full path such as `/user/:id/posts`.
    pub fn compile(path: &str) -> Self {
        let segments = path
            .split('/')
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) if !name.is_empty() => Segment::Param(name.to_string()),
                _ => Segment::Literal(segment.to_string()),
            })
            .collect();

        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the extracted params if `pathname` matches this pattern exactly.
    pub fn match_params(&self, pathname: &str) -> Option<Params> {
        let mut params = Params::new();
        let mut parts = pathname.split('/');

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(literal) => {
                    if literal != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), part.to_string());
                }
            }
        }

        // Leftover pathname segments mean the pattern is a strict prefix.
        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }
}

/// A matched route and the params extracted for it.
#[derive(Debug)]
pub struct RouteMatch<'a, V> {
    pub route: &'a Route<V>,
    /// Normalized full path of the matched route.
    pub full_path: String,
    pub params: Params,
}

/// Find the first route in tree order whose full path matches `pathname`.
pub fn match_routes<'a, V>(routes: &'a [Route<V>], pathname: &str) -> Option<RouteMatch<'a, V>> {
    match_level(routes, pathname, "")
}

fn match_level<'a, V>(
    routes: &'a [Route<V>],
    pathname: &str,
    base_path: &str,
) -> Option<RouteMatch<'a, V>> {
    for route in routes {
        let path = full_path(base_path, route.path());

        if let Some(params) = PathPattern::compile(&path).match_params(pathname) {
            return Some(RouteMatch {
                route,
                full_path: path,
                params,
            });
        }

        if !route.children().is_empty() {
            if let Some(found) = match_level(route.children(), pathname, &path) {
                return Some(found);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_compile_segments() {
        let pattern = PathPattern::compile("/user/:id");
        assert_eq!(pattern.segments(), &[
            Segment::Literal(String::new()),
            Segment::Literal("user".into()),
            Segment::Param("id".into()),
        ]);
    }

    #[test]
    fn test_bare_colon_is_literal() {
        let pattern = PathPattern::compile("/a/:");
        assert_eq!(pattern.segments()[2], Segment::Literal(":".into()));
        assert!(pattern.match_params("/a/:").is_some());
        assert!(pattern.match_params("/a/x").is_none());
    }

    #[test]
    fn test_literal_match() {
        let pattern = PathPattern::compile("/about");
        assert_eq!(pattern.match_params("/about"), Some(Params::new()));
        assert!(pattern.match_params("/About").is_none());
        assert!(pattern.match_params("/about/").is_none());
        assert!(pattern.match_params("/about/team").is_none());
        assert!(pattern.match_params("/").is_none());
    }

    #[test]
    fn test_root_pattern() {
        let pattern = PathPattern::compile("/");
        assert_eq!(pattern.match_params("/"), Some(Params::new()));
        assert!(pattern.match_params("").is_none());
        assert!(pattern.match_params("/a").is_none());
    }

    #[test]
    fn test_dynamic_segment() {
        let pattern = PathPattern::compile("/user/:user");
        assert_eq!(pattern.match_params("/user/123"), Some(params(&[("user", "123")])));
        assert!(pattern.match_params("/user/").is_none());
        assert!(pattern.match_params("/user").is_none());
        assert!(pattern.match_params("/user/123/extra").is_none());
        assert!(pattern.match_params("/users/123").is_none());
    }

    #[test]
    fn test_multiple_params() {
        let pattern = PathPattern::compile("/org/:org/repo/:repo");
        assert_eq!(
            pattern.match_params("/org/acme/repo/router"),
            Some(params(&[("org", "acme"), ("repo", "router")]))
        );
        assert!(pattern.match_params("/org/acme/repos/router").is_none());
    }

    #[test]
    fn test_first_sibling_wins() {
        let routes = vec![
            Route::new("/user/:id", "dynamic"),
            Route::new("/user/me", "literal"),
        ];
        let found = match_routes(&routes, "/user/me").unwrap();
        assert_eq!(*found.route.view(), "dynamic");
        assert_eq!(found.params, params(&[("id", "me")]));
    }

    #[test]
    fn test_nested_leaf_match() {
        let routes = vec![Route::new("/", "home").with_children(vec![
            Route::new("about", "about").with_children(vec![Route::new("/team", "team")]),
        ])];

        assert_eq!(*match_routes(&routes, "/about/team").unwrap().route.view(), "team");
        assert_eq!(*match_routes(&routes, "/about").unwrap().route.view(), "about");
        assert_eq!(*match_routes(&routes, "/").unwrap().route.view(), "home");
        assert!(match_routes(&routes, "/about/unknown").is_none());
    }

    #[test]
    fn test_parent_checked_before_children() {
        let routes = vec![Route::new("/a", "parent").with_children(vec![Route::new("", "index")])];
        let found = match_routes(&routes, "/a").unwrap();
        assert_eq!(*found.route.view(), "parent");
    }

    #[test]
    fn test_nested_dynamic_params() {
        let routes = vec![Route::new("/users", "users").with_children(vec![
            Route::new(":id", "user").with_children(vec![Route::new("posts/:post", "post")]),
        ])];

        let found = match_routes(&routes, "/users/42/posts/7").unwrap();
        assert_eq!(*found.route.view(), "post");
        assert_eq!(found.full_path, "/users/:id/posts/:post");
        assert_eq!(found.params, params(&[("id", "42"), ("post", "7")]));
    }

    #[test]
    fn test_later_top_level_route_after_failed_subtree() {
        let routes = vec![
            Route::new("/docs", "docs").child(Route::new("intro", "intro")),
            Route::new("/blog", "blog"),
        ];
        assert_eq!(*match_routes(&routes, "/blog").unwrap().route.view(), "blog");
    }

    #[test]
    fn test_no_match() {
        let routes = vec![Route::new("/", "home"), Route::new("/about", "about")];
        assert!(match_routes(&routes, "/missing").is_none());
        assert!(match_routes::<&str>(&[], "/").is_none());
    }
}
