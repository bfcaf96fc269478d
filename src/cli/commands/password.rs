//! Admin password hashing command.

use console::{style, Term};

use crate::server::auth::hash_password;

/// Print an Argon2 hash for the `admin_password_hash` setting.
pub fn cmd_hash_password(password: Option<String>) -> anyhow::Result<()> {
    let password = match password {
        Some(p) => p,
        None => {
            let term = Term::stderr();
            term.write_str("Admin password: ")?;
            let first = term.read_secure_line()?;
            term.write_str("Repeat password: ")?;
            let second = term.read_secure_line()?;
            if first != second {
                anyhow::bail!("Passwords do not match");
            }
            first
        }
    };

    if password.is_empty() {
        anyhow::bail!("Password must not be empty");
    }

    let hash = hash_password(&password)?;
    eprintln!(
        "{} Add this to gamelog.toml as admin_password_hash (or set GAMELOG_ADMIN_PASSWORD_HASH):",
        style("✓").green()
    );
    println!("{}", hash);
    Ok(())
}
