//! The API endpoint URIs.
//!
//! For endpoints that take an ID parameter, e.g., '/users/{id}', use
//! [format_endpoint].

/// The route for creating a new account.
pub const SIGN_UP: &str = "/auth/signup";
/// The route for exchanging credentials for a bearer token.
pub const LOG_IN: &str = "/auth/login";
/// The route to list users.
pub const USERS: &str = "/users";
/// The route to fetch a single user.
pub const USER: &str = "/users/{id}";
/// The route to list and create categories.
pub const CATEGORIES: &str = "/category";
/// The route to fetch, update or delete a single category.
pub const CATEGORY: &str = "/category/{id}";
/// The route to list and create priorities.
pub const PRIORITIES: &str = "/priority";
/// The route to fetch, update or delete a single priority.
pub const PRIORITY: &str = "/priority/{id}";
/// The route to list and create transactions.
pub const TRANSACTIONS: &str = "/transaction";
/// The route to fetch, update or delete a single transaction.
pub const TRANSACTION: &str = "/transaction/{id}";
/// The route for per-day spending totals over a date range.
pub const DAILY_SPENDING: &str = "/daily";
/// The route for per-category spending totals over a date range.
pub const HIGHEST_CATEGORY: &str = "/highest-cat";
/// The route for per-priority spending totals over a date range.
pub const HIGHEST_PRIORITY: &str = "/highest-prio";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{id}', '{id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: impl std::fmt::Display) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
