//! Per-project result summaries and their text rendering.

use std::io::{self, Write};

use crate::gitlab::Blob;

/// Outcome of searching one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub project_name: String,
    /// Hits GitLab returned. At most `cap + 1`.
    pub hit_count: usize,
    /// GitLab had more hits than the display cap.
    pub truncated: bool,
    /// The first `min(cap, hit_count)` hits, in GitLab order.
    pub displayed_hits: Vec<Blob>,
    pub cap: usize,
}

impl ProjectSummary {
    /// Classify the hits returned for a `cap + 1` sized search.
    pub fn new(project_name: impl Into<String>, mut hits: Vec<Blob>, cap: usize) -> Self {
        let hit_count = hits.len();
        let truncated = hit_count > cap;
        hits.truncate(cap);

        Self {
            project_name: project_name.into(),
            hit_count,
            truncated,
            displayed_hits: hits,
            cap,
        }
    }

    pub fn has_results(&self) -> bool {
        self.hit_count > 0
    }

    /// "N+" when truncated, otherwise the exact count.
    pub fn size_label(&self) -> String {
        if self.truncated {
            format!("{}+", self.cap)
        } else {
            self.hit_count.to_string()
        }
    }

    /// Write the human readable block for this project.
    pub fn render<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        if !self.has_results() {
            return write!(out, "🔍 Project [{}] has no results\n\n", self.project_name);
        }

        let comment = if self.truncated {
            format!(" (only show {} results)", self.cap)
        } else {
            String::new()
        };
        write!(
            out,
            "🔍 Project [{}] has [{}] results{}\n\n",
            self.project_name,
            self.size_label(),
            comment
        )?;

        for hit in &self.displayed_hits {
            write!(out, "👉 {}\n\n", hit.path)?;
            writeln!(out, "```#L{}", hit.line)?;
            writeln!(out, "{}", normalize_hit_text(&hit.data))?;
            write!(out, "```\n\n")?;
        }
        Ok(())
    }
}

/// Display form of a hit: tabs become two spaces, then surrounding
/// newlines are stripped.
pub fn normalize_hit_text(data: &str) -> String {
    data.replace('\t', "  ").trim_matches('\n').to_string()
}
