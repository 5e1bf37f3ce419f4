//! Route labels for request spans.

const COUPONS_SEGMENT: &str = "coupons";
const APPLY_SEGMENT: &str = "apply";

/// Collapse coupon codes in a request path into a `{code}` placeholder so
/// spans for different coupons group under one route.
pub(super) fn route_for_path(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    let mut route = String::new();

    for (index, segment) in segments.iter().enumerate() {
        route.push('/');

        let is_code = index == 1
            && segments.first() == Some(&COUPONS_SEGMENT)
            && *segment != APPLY_SEGMENT;

        route.push_str(if is_code { "{code}" } else { *segment });
    }

    if route.is_empty() {
        route.push('/');
    }

    route
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_coupon_codes() {
        assert_eq!(route_for_path("/coupons/WELCOME10"), "/coupons/{code}");
        assert_eq!(
            route_for_path("/coupons/save20/deactivate"),
            "/coupons/{code}/deactivate"
        );
    }

    #[test]
    fn keeps_static_routes() {
        assert_eq!(route_for_path("/"), "/");
        assert_eq!(route_for_path("/coupons"), "/coupons");
        assert_eq!(route_for_path("/coupons/apply"), "/coupons/apply");
        assert_eq!(route_for_path("/health"), "/health");
    }
}
