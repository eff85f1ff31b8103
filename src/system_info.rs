use git_version::git_version;

// -modified marks a dirty working tree.
const COMMIT: &str = git_version!(
    args = ["--abbrev=10", "--always", "--dirty=-modified"],
    fallback = "unknown"
);

/// One-line build banner served on the health endpoint.
pub fn get_system_info() -> String {
    let profile = if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    };

    let latest = option_env!("LATEST_TAG").unwrap_or("");
    let ahead = option_env!("COMMITS_AHEAD").unwrap_or("");
    let version = match option_env!("RELEASE_VERSION") {
        Some(tag) if !tag.is_empty() => tag.to_string(),
        _ if !latest.is_empty() && !ahead.is_empty() => format!("{latest}+{ahead}"),
        _ if !latest.is_empty() => format!("{latest}+"),
        _ => env!("CARGO_PKG_VERSION").to_string(),
    };

    format!(
        "{} {} (commit {}, {} build)",
        env!("CARGO_PKG_NAME"),
        version,
        COMMIT,
        profile
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_names_package_and_profile() {
        let info = get_system_info();
        assert!(info.starts_with("autosage "));
        assert!(info.contains("commit "));
        assert!(info.contains("dev build") || info.contains("release build"));
    }
}
