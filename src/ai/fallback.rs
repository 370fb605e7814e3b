// file: src/ai/fallback.rs
// version: 1.0.2
// guid: 58e2c9a7-13f6-4b80-9d24-a7f0b61e3c95

//! Rule-based commit message generation
//!
//! Used when the model server is unreachable or produces no usable
//! output. The rules look at what the diff adds and removes and always
//! produce a Conventional-Commits message.

/// Simple counts derived from a unified diff
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub added_lines: usize,
    pub removed_lines: usize,
}

/// Count added and removed lines, excluding the `+++`/`---` file headers
pub fn diff_stats(diff: &str) -> DiffStats {
    let mut stats = DiffStats::default();
    for line in diff.lines() {
        if line.starts_with('+') && !line.starts_with("+++") {
            stats.added_lines += 1;
        } else if line.starts_with('-') && !line.starts_with("---") {
            stats.removed_lines += 1;
        }
    }
    stats
}

// Added-line markers that suggest new functionality.
const FEATURE_MARKERS: [&str; 6] = ["fn ", "struct ", "impl ", "def ", "class ", "use "];

// Manifest files whose changes are dependency chores.
const MANIFEST_MARKERS: [&str; 4] = ["cargo.toml", "package.json", "requirements", "go.mod"];

fn classify(diff: &str) -> &'static str {
    let lowered = diff.to_lowercase();

    let mut saw_feat = false;
    let mut saw_fix = false;
    let mut saw_test = false;

    for line in lowered.lines() {
        if line.starts_with('+') && FEATURE_MARKERS.iter().any(|m| line.contains(m)) {
            saw_feat = true;
        }
        if line.contains("fix") || line.contains("bug") {
            saw_fix = true;
        }
        if line.contains("test") {
            saw_test = true;
        }
    }

    let saw_docs = lowered.contains(".md") || lowered.contains("readme");
    let saw_chore = MANIFEST_MARKERS.iter().any(|m| lowered.contains(m));

    if saw_feat {
        "feat"
    } else if saw_fix {
        "fix"
    } else if saw_test {
        "test"
    } else if saw_docs {
        "docs"
    } else if saw_chore {
        "chore"
    } else {
        "chore"
    }
}

/// Produce a commit message from the diff alone. Never fails.
pub fn generate_fallback_message(diff: &str) -> String {
    if diff.trim().is_empty() {
        return "chore: update codebase".to_string();
    }

    let stats = diff_stats(diff);
    let commit_type = classify(diff);
    let lowered = diff.to_lowercase();

    if MANIFEST_MARKERS.iter().any(|m| lowered.contains(m)) && commit_type == "chore" {
        return "chore: update dependencies".to_string();
    }

    let subject = if stats.added_lines > stats.removed_lines * 2 {
        "add new features and functionality"
    } else if stats.removed_lines > stats.added_lines * 2 {
        "remove deprecated code"
    } else {
        "update and improve codebase"
    };

    format!("{}: {}", commit_type, subject)
}
