//! The fixed set of chat commands and their replies

use std::path::PathBuf;
use crate::domain::entities::{Command, CommandRegistry};

pub const VSCODE: &str = "Benutzt wird vscode von Microsoft - https://code.visualstudio.com/";

pub const EXTENSIONS: &str = "Die für mich wichtigsten Extensions (für vscode) sind: Remote Containers, Settings Sync, TODO Highlight, GitLens, markdownlint, Prettier, YAML, Todo+, Todo Tree, TODO Highlight";

pub const REPOSITORY: &str = "Alle verwendeten Repositories findest du unter https://github.com/curi0s - Das Repository zum Thema \"Tech Streams\" findest du hier https://github.com/curi0s/stream";

pub const HACKINTOSH: &str = "Der Hackintosh ist ein PC auf dem MacOS installiert ist. Die verbauten Komponenten findest du hier https://github.com/curi0s/stream#computer-hackintosh";

pub const JOB: &str = "Fabian hat mit ca. 12 Jahren begonnen, sich fürs Programmieren zu interessieren und hat dadurch mit HTML, CSS und PHP angefangen. Später hat er dann eine Ausbildung zum Fachinformatiker Systemintegration absolviert und arbeitet inzwischen seit mehr als 10 Jahren als Systemengineer";

pub const THEME: &str = "Das Theme für vscode ist JetJet-Alternate-Gray - https://marketplace.visualstudio.com/items?itemName=JohnyGeorges.jetjet-theme";

pub const SOCIAL: &str = "Twitter: https://www.twitter.com/curi0sDE - Discord: https://discord.gg/curi0sDE - Instagram: https://www.instagram.com/curi0sDE";

pub const FONT: &str = "Als font wird Fira Code V2 verwendet: https://github.com/tonsky/FiraCode";

/// Build the registry of every command the bot answers.
///
/// `today_file` backs the `today` command; `prefix` is only used to render
/// the `help` listing.
pub fn default_registry(prefix: &str, today_file: impl Into<PathBuf>) -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    registry.register(Command::text("vscode", VSCODE)
        .with_aliases(["editor"]));

    registry.register(Command::text("extensions", EXTENSIONS)
        .with_aliases(["ext"]));

    registry.register(Command::text("repository", REPOSITORY)
        .with_aliases(["repo", "repositories", "repos"]));

    registry.register(Command::text("hackintosh", HACKINTOSH)
        .with_aliases(["hack", "mac", "macos"]));

    registry.register(Command::text("job", JOB)
        .with_aliases(["beruf"]));

    registry.register(Command::text("theme", THEME));

    registry.register(Command::file("today", today_file)
        .with_aliases(["heute"]));

    registry.register(Command::text("social", SOCIAL)
        .with_aliases(["twitter", "github", "git", "discord", "insta", "instagram"]));

    registry.register(Command::text("font", FONT));

    let mut names = registry.names();
    names.push("help");
    names.sort_unstable();
    let listing = names
        .iter()
        .map(|name| format!("{}{}", prefix, name))
        .collect::<Vec<_>>()
        .join(", ");

    registry.register(Command::text("help", listing)
        .with_aliases(["commands"]));

    registry
}
