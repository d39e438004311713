use std::fs;
use std::io::{self, Write};
use std::process::Command;
use toml_edit::{DocumentMut, Item};

type Error = Box<dyn std::error::Error>;

/// Runs a command, surfacing a failure as the given message.
fn run(program: &str, args: &[&str], error_msg: &str) -> Result<(), Error> {
    println!("Executing: {} {}", program, args.join(" "));
    let status = Command::new(program).args(args).status()?;
    if !status.success() {
        return Err(error_msg.into());
    }
    Ok(())
}

/// Runs a command and captures stdout; a non-zero exit yields None.
fn capture(program: &str, args: &[&str]) -> Result<Option<String>, Error> {
    let output = Command::new(program).args(args).output()?;
    if !output.status.success() {
        return Ok(None);
    }
    Ok(Some(String::from_utf8(output.stdout)?.trim().to_string()))
}

fn prompt(message: &str) -> Result<String, io::Error> {
    print!("{}: ", message);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn confirm(message: &str) -> Result<bool, io::Error> {
    Ok(prompt(&format!("{} (y/n)", message))?.to_lowercase() == "y")
}

/// Latest tag, or the initial commit when no tag exists yet.
fn latest_tag() -> Result<Option<String>, Error> {
    if let Some(tag) = capture("git", &["describe", "--tags", "--abbrev=0"])? {
        return Ok(Some(tag));
    }
    capture("git", &["rev-list", "--max-parents=0", "HEAD"])
}

/// One `- subject` line per commit since `since` (or all commits).
fn commit_history(since: Option<&str>) -> Result<String, Error> {
    let range;
    let mut args = vec!["log", "--pretty=format:- %s"];
    if let Some(tag) = since {
        range = format!("{}..HEAD", tag);
        args.push(&range);
    }
    Ok(capture("git", &args)?.unwrap_or_default())
}

/// Prepends a dated section for `version` to CHANGELOG.md, keeping the
/// header line at the top.
fn update_changelog(version: &str, notes: &str) -> Result<(), Error> {
    let existing = fs::read_to_string("CHANGELOG.md").unwrap_or_default();
    let date = chrono::Local::now().format("%Y-%m-%d");
    let section = format!("## {} ({})\n\n{}\n", version, date, notes);

    let changelog = match existing.find("\n## ") {
        Some(pos) => {
            let (header, rest) = existing.split_at(pos + 1);
            format!("{}{}\n{}", header, section, rest)
        }
        None if existing.is_empty() => format!("# Changelog\n\n{}", section),
        None => format!("{}\n{}", existing.trim_end(), section),
    };

    fs::write("CHANGELOG.md", changelog)?;
    println!("Updated CHANGELOG.md with section for {}", version);
    Ok(())
}

fn main() -> Result<(), Error> {
    let cargo_content = fs::read_to_string("Cargo.toml")?;
    let mut doc = cargo_content.parse::<DocumentMut>()?;

    let current_version = doc["package"]["version"]
        .as_str()
        .ok_or("Could not find version in Cargo.toml")?
        .to_string();

    println!("Current version is: {}", current_version);
    let new_version = prompt("Enter new version")?;
    if new_version.is_empty() {
        return Err("Version cannot be empty".into());
    }

    // Gather release notes before touching anything.
    let previous_tag = latest_tag()?;
    println!(
        "Previous tag: {}",
        previous_tag.as_deref().unwrap_or("None")
    );
    let notes = commit_history(previous_tag.as_deref())?;
    if notes.is_empty() {
        println!("Warning: No commit history found between previous tag and HEAD.");
        if !confirm("Continue with empty release notes?")? {
            println!("Release aborted.");
            return Ok(());
        }
    } else {
        println!("Release notes:\n{}", notes);
    }

    if !confirm(&format!("Ready to release version {}?", new_version))? {
        println!("Release aborted.");
        return Ok(());
    }

    // Bump the manifest, then refresh Cargo.lock to match.
    doc["package"]["version"] = Item::from(new_version.as_str());
    fs::write("Cargo.toml", doc.to_string())?;
    println!("Updated Cargo.toml with new version: {}", new_version);
    run("cargo", &["check"], "Failed to update Cargo.lock")?;

    update_changelog(&new_version, &notes)?;

    let tag = format!("v{}", new_version);
    let commit_msg = format!("Bump version to {}", new_version);
    let tag_msg = format!("Version {}", new_version);
    run(
        "git",
        &["add", "Cargo.toml", "Cargo.lock", "CHANGELOG.md"],
        "Failed to stage release files",
    )?;
    run(
        "git",
        &["commit", "-m", &commit_msg],
        "Failed to commit version bump",
    )?;
    run(
        "git",
        &["tag", "-a", &tag, "-m", &tag_msg],
        "Failed to create tag",
    )?;
    run("git", &["push"], "Failed to push commits")?;
    run("git", &["push", "--tags"], "Failed to push tags")?;

    if confirm("Publish to crates.io?")? {
        run("cargo", &["publish"], "Failed to publish to crates.io")?;
    } else {
        println!("Skipping crates.io publishing.");
    }

    if confirm("Create GitHub release?")? {
        run(
            "gh",
            &["release", "create", &tag, "--title", &tag, "--notes", &notes],
            "Failed to create GitHub release",
        )?;
    } else {
        println!("Skipping GitHub release creation.");
    }

    println!("Successfully released version {}", new_version);
    Ok(())
}
