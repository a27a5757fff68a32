use anyhow::{bail, Result};
use bizportal_lib::types::User;
use bizportal_lib::PortalClient;
use clap::Args;

use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Password; falls back to the BIZPORTAL_PASSWORD environment variable
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct WhoamiArgs {
    /// Ask the backend instead of reading the stored profile
    #[arg(long)]
    pub remote: bool,
}

pub async fn login(args: &LoginArgs, client: &PortalClient, format: OutputFormat) -> Result<()> {
    let password = match &args.password {
        Some(p) => p.clone(),
        None => match std::env::var("BIZPORTAL_PASSWORD") {
            Ok(p) if !p.is_empty() => p,
            _ => bail!("no password given: pass --password or set BIZPORTAL_PASSWORD"),
        },
    };
    let user = client.auth().login(&args.email, &password).await?;
    print_user(&user, format);
    Ok(())
}

pub async fn logout(client: &PortalClient) -> Result<()> {
    if client.auth().logout().await {
        eprintln!("Signed out");
    } else {
        eprintln!("Not signed in");
    }
    Ok(())
}

pub async fn whoami(args: &WhoamiArgs, client: &PortalClient, format: OutputFormat) -> Result<()> {
    if !client.session().is_authenticated() {
        bail!("not signed in; run `bizportal login` first");
    }
    let user = if args.remote {
        client.auth().current_user().await?
    } else {
        client.auth().cached_user().unwrap_or_default()
    };
    print_user(&user, format);
    Ok(())
}

fn print_user(user: &User, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(user),
        _ => println!("{}", describe(user)),
    }
}

/// `Dana <dana@corp.test> (manager)`
fn describe(user: &User) -> String {
    let mut line = user.display_name();
    if let (Some(_), Some(email)) = (&user.name, &user.email) {
        line.push_str(&format!(" <{}>", email));
    }
    if let Some(role) = &user.role {
        line.push_str(&format!(" ({})", role));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_full_profile() {
        let user = User {
            name: Some("Dana".into()),
            email: Some("dana@corp.test".into()),
            role: Some("manager".into()),
            ..Default::default()
        };
        assert_eq!(describe(&user), "Dana <dana@corp.test> (manager)");
    }

    #[test]
    fn describe_email_only() {
        let user = User {
            email: Some("ops@corp.test".into()),
            ..Default::default()
        };
        assert_eq!(describe(&user), "ops@corp.test");
    }
}
