// What the route guard does when a dashboard screen is entered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardStep {
    // No token: clear lastPath and go to /login
    Redirect,
    // Token but no session user yet: confirm it with /auth/verify
    Verify,
    // Session already hydrated
    Admit,
}

pub fn guard_step(token: Option<&str>, has_user: bool, verified: bool) -> GuardStep {
    match token {
        None => GuardStep::Redirect,
        Some(t) if t.trim().is_empty() => GuardStep::Redirect,
        Some(_) if has_user && verified => GuardStep::Admit,
        Some(_) => GuardStep::Verify,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_redirects() {
        assert_eq!(guard_step(None, true, true), GuardStep::Redirect);
        assert_eq!(guard_step(Some("  "), false, false), GuardStep::Redirect);
    }

    #[test]
    fn cached_user_is_still_verified_once() {
        assert_eq!(guard_step(Some("abc"), true, false), GuardStep::Verify);
        assert_eq!(guard_step(Some("abc"), false, false), GuardStep::Verify);
        assert_eq!(guard_step(Some("abc"), true, true), GuardStep::Admit);
    }
}
