//! Route labels for request spans and metrics.

/// Collapse caller-chosen path segments into route parameters so labels stay bounded.
pub(super) fn route_for_path(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut route = String::new();
    let mut previous = "";

    for segment in path.trim_start_matches('/').split('/') {
        route.push('/');

        if previous == "products" && !segment.is_empty() {
            route.push_str("{product}");
        } else {
            route.push_str(segment);
        }

        previous = segment;
    }

    route
}
