//! `folio auth` command implementation.

use folio_client::LoginStatus;

use super::{GlobalArgs, client_from_config};
use crate::error::CliError;
use crate::output::Output;

/// Execute the auth command.
pub(crate) fn execute(global: &GlobalArgs) -> Result<(), CliError> {
    let output = Output::new();
    let config = global.load_config()?;
    let client = client_from_config(&config);

    let status = client.login_status()?;
    output.login(&status, &describe(&status, client.base_url()));
    Ok(())
}

/// Human-readable login status, with links made absolute.
fn describe(status: &LoginStatus, base_url: &str) -> String {
    let absolute = |link: &str| {
        if link.starts_with('/') {
            format!("{base_url}{link}")
        } else {
            link.to_owned()
        }
    };

    match status {
        LoginStatus::LoggedIn { email, logout_url } => match logout_url {
            Some(url) => format!("Logged in as {email} (log out: {})", absolute(url)),
            None => format!("Logged in as {email}"),
        },
        LoginStatus::LoggedOut { login_url } => match login_url {
            Some(url) => format!("Not logged in (log in: {})", absolute(url)),
            None => "Not logged in".to_owned(),
        },
    }
}
