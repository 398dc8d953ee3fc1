//! Login status reported by `GET /auth`.
//!
//! The endpoint answers with a small HTML snippet rather than JSON:
//!
//! ```text
//! logged in as someone@example.com
//! <p>Logout <a href="/_ah/logout?continue=%2F">here</a>.</p>
//! ```
//!
//! or, when nobody is logged in, only the login paragraph.

/// Marker the backend prints before the user's email.
const LOGGED_IN_MARKER: &str = "logged in as";

/// Parsed login status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStatus {
    /// A user is logged in.
    LoggedIn {
        /// The user's email.
        email: String,
        /// Link that logs the user out, if the backend sent one.
        logout_url: Option<String>,
    },
    /// Nobody is logged in.
    LoggedOut {
        /// Link that starts the login flow, if the backend sent one.
        login_url: Option<String>,
    },
}

impl LoginStatus {
    /// Parse the `/auth` response body.
    #[must_use]
    pub fn parse(body: &str) -> Self {
        let link = first_href(body);

        let email = body.find(LOGGED_IN_MARKER).and_then(|pos| {
            body[pos + LOGGED_IN_MARKER.len()..]
                .split_whitespace()
                .next()
                .map(str::to_owned)
        });

        match email {
            Some(email) => Self::LoggedIn {
                email,
                logout_url: link,
            },
            None => Self::LoggedOut { login_url: link },
        }
    }

    /// Email of the logged-in user, if any.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        match self {
            Self::LoggedIn { email, .. } => Some(email),
            Self::LoggedOut { .. } => None,
        }
    }
}

/// Extract the first `href="..."` value.
fn first_href(body: &str) -> Option<String> {
    let start = body.find("href=\"")? + "href=\"".len();
    let len = body[start..].find('"')?;
    Some(body[start..start + len].to_owned())
}
