use colored::Colorize;
use similar::ChangeTag;

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a dim/muted message to stderr
pub fn hint(msg: &str) {
    eprintln!("  {}", msg.dimmed());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

/// Deleted and inserted lines between two texts, without trailing newlines.
pub fn changed_lines(before: &str, after: &str) -> Vec<(ChangeTag, String)> {
    similar::TextDiff::from_lines(before, after)
        .iter_all_changes()
        .filter(|change| change.tag() != ChangeTag::Equal)
        .map(|change| {
            let line = change.value().trim_end_matches('\n').to_string();
            (change.tag(), line)
        })
        .collect()
}

/// Print a line diff between two texts. Returns whether anything changed.
pub fn diff(before: &str, after: &str) -> bool {
    let changes = changed_lines(before, after);

    for (tag, line) in &changes {
        match tag {
            ChangeTag::Delete => println!("  {}", format!("- {line}").red()),
            ChangeTag::Insert => println!("  {}", format!("+ {line}").green()),
            ChangeTag::Equal => {}
        }
    }

    if changes.is_empty() {
        println!("  {}", "(no changes)".dimmed());
    }
    !changes.is_empty()
}
