//! `acs users`: the device's enrolled users.

use std::io::Write;

use acs_core::DirectoryUser;
use acs_device::UserDirectoryFetcher;
use anyhow::Result;

use super::truncate;

/// Format directory users as a table.
pub fn format_users(users: &[DirectoryUser]) -> String {
    if users.is_empty() {
        return "No users enrolled on the device.\n".to_string();
    }

    let mut output = format!("{:<8}  NAME\n", "ID");
    output.push_str("────────  ──────────────────────────────\n");
    for user in users {
        output.push_str(&format!("{:<8}  {}\n", user.id, truncate(&user.name, 30)));
    }
    output
}

pub async fn run<W: Write>(out: &mut W, fetcher: &UserDirectoryFetcher, json: bool) -> Result<()> {
    let users = fetcher.fetch_users().await?;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&users)?)?;
    } else {
        write!(out, "{}", format_users(&users))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    fn user(id: &str, name: &str) -> DirectoryUser {
        DirectoryUser {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_users_table() {
        let output = format_users(&[user("12", "Marta Díaz"), user("1042", "Ana Rojas")]);
        assert_snapshot!(output, @r"
        ID        NAME
        ────────  ──────────────────────────────
        12        Marta Díaz
        1042      Ana Rojas
        ");
    }

    #[test]
    fn test_users_empty() {
        assert_snapshot!(format_users(&[]), @"No users enrolled on the device.");
    }
}
