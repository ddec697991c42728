//! `login`, `logout`, and `whoami` commands.

use clap::Args;

use crate::{prompt_line, AppHandles};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account username.
    pub username: String,

    /// Account password. Prompted for when omitted.
    #[arg(long)]
    pub password: Option<String>,
}

/// Exchange credentials for a session and persist the tokens.
pub async fn run_login(args: &LoginArgs, handles: &AppHandles) -> anyhow::Result<u8> {
    let password = match &args.password {
        Some(password) => password.clone(),
        None => prompt_line("Password: ")?,
    };

    match handles.session.login(&args.username, &password).await {
        Ok(()) => {
            let identity = handles
                .session
                .identity()
                .map(|identity| identity.username)
                .unwrap_or_else(|| args.username.clone());
            println!("Signed in as {identity}.");
            Ok(0)
        }
        Err(message) => {
            eprintln!("{message}");
            Ok(1)
        }
    }
}

/// Drop the session and remove persisted tokens.
pub fn run_logout(handles: &AppHandles) -> anyhow::Result<u8> {
    handles.session.logout();
    println!("Signed out.");
    Ok(0)
}

/// Show the authenticated identity and its roles.
pub async fn run_whoami(handles: &AppHandles) -> anyhow::Result<u8> {
    handles.session.initialize().await;
    match handles.session.identity() {
        Some(identity) => {
            println!("{}", identity.username);
            if let Some(email) = &identity.email {
                println!("  email: {email}");
            }
            if identity.roles.is_empty() {
                println!("  roles: (none)");
            } else {
                println!("  roles: {}", identity.roles.join(", "));
            }
            Ok(0)
        }
        None => {
            eprintln!("Not signed in. Run `clinic login <username>` first.");
            Ok(1)
        }
    }
}
