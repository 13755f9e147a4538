// Backend location is baked in at build time: ADMIN_API_BASE=https://... trunk build
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api/v1";

// Local storage keys shared by the session, the route guard and the HTTP client
pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const LAST_PATH_KEY: &str = "lastPath";

pub fn api_base() -> &'static str {
    option_env!("ADMIN_API_BASE").unwrap_or(DEFAULT_API_BASE)
}

// Join a resource path ("/tasks", "tasks/3") onto the configured base URL
pub fn endpoint(path: &str) -> String {
    join_url(api_base(), path)
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::join_url;

    #[test]
    fn joins_without_doubling_slashes() {
        assert_eq!(join_url("http://api/v1/", "/tasks"), "http://api/v1/tasks");
        assert_eq!(join_url("http://api/v1", "tasks/7/send"), "http://api/v1/tasks/7/send");
    }
}
