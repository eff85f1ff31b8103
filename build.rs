use std::process::Command;

fn main() {
    // RELEASE_VERSION is only non-empty when HEAD sits exactly on a tag.
    let tag = git_output(&["describe", "--tags", "--exact-match"]);
    println!("cargo:rustc-env=RELEASE_VERSION={}", tag);

    // Latest reachable tag, for describing dev builds.
    let latest = git_output(&["describe", "--tags", "--abbrev=0"]);
    println!("cargo:rustc-env=LATEST_TAG={}", latest);

    // Commits since the latest tag.
    let ahead = if latest.is_empty() {
        String::new()
    } else {
        git_output(&["rev-list", "--count", &format!("{}..HEAD", latest)])
    };
    println!("cargo:rustc-env=COMMITS_AHEAD={}", ahead);
}

fn git_output(args: &[&str]) -> String {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_default()
}
