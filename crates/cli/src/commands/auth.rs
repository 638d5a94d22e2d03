//! Account commands for the local sign-in stub.

use secrecy::SecretString;

use versiq_core::OAuthProvider;

use super::{AppContext, CommandError};

/// Create an account and sign it in.
///
/// # Errors
///
/// Propagates [`CommandError::Auth`] from the identity provider.
pub fn signup(
    ctx: &mut AppContext,
    email: &str,
    password: SecretString,
    name: Option<&str>,
) -> Result<(), CommandError> {
    let user = ctx.session.sign_up(email, &password, name)?;
    tracing::info!("Account created, signed in as {} <{}>", user.name, user.email);
    Ok(())
}

/// Sign in to the stored account.
///
/// # Errors
///
/// Propagates [`CommandError::Auth`] from the identity provider.
pub fn login(ctx: &mut AppContext, email: &str, password: SecretString) -> Result<(), CommandError> {
    let user = ctx.session.log_in(email, &password)?;
    tracing::info!("Signed in as {} <{}>", user.name, user.email);
    Ok(())
}

/// Sign in through the demo Google OAuth flow.
///
/// # Errors
///
/// Propagates [`CommandError::Auth`] from the identity provider.
pub fn google(ctx: &mut AppContext) -> Result<(), CommandError> {
    let user = ctx.session.sign_in_with_oauth(OAuthProvider::Google)?;
    tracing::info!("Signed in with Google as {} <{}>", user.name, user.email);
    Ok(())
}

/// Sign out, removing the stored account.
pub fn logout(ctx: &mut AppContext) {
    ctx.session.log_out();
    tracing::info!("Signed out");
}

/// Print the current identity.
pub fn whoami(ctx: &AppContext) {
    match ctx.session.current_user() {
        Some(user) => println!("Signed in as {} <{}>", user.name, user.email),
        None => println!("Not signed in."),
    }
}
