//! Navigation targets and identifier parsing.

use crate::error::InvalidIdentifier;

/// Where the UI can be: the user list, or one user's detail view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    List,
    UserDetail(u64),
}

impl Route {
    /// Resolve the startup route from the optional `--user` argument.
    pub fn from_startup_arg(user: Option<&str>) -> Result<Self, InvalidIdentifier> {
        match user {
            None => Ok(Route::List),
            Some(raw) => parse_user_id(raw).map(Route::UserDetail),
        }
    }
}

/// Parse a user identifier as typed in the goto input or on the command
/// line. Anything that is not an unsigned integer is rejected; the caller
/// must not issue a request for a rejected identifier.
pub fn parse_user_id(raw: &str) -> Result<u64, InvalidIdentifier> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| InvalidIdentifier(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_integers_parse() {
        assert_eq!(parse_user_id("42"), Ok(42));
        assert_eq!(parse_user_id(" 7 "), Ok(7));
    }

    #[test]
    fn non_integers_are_rejected() {
        assert!(parse_user_id("abc").is_err());
        assert!(parse_user_id("-1.5").is_err());
        assert!(parse_user_id("-1").is_err());
        assert!(parse_user_id("").is_err());
        assert!(parse_user_id("4 2").is_err());
    }

    #[test]
    fn startup_route_defaults_to_list() {
        assert_eq!(Route::from_startup_arg(None), Ok(Route::List));
        assert_eq!(Route::from_startup_arg(Some("3")), Ok(Route::UserDetail(3)));
        assert_eq!(
            Route::from_startup_arg(Some("nope")),
            Err(InvalidIdentifier("nope".to_string()))
        );
    }
}
