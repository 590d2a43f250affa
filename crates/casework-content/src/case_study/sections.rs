//! Body splitting into named long-form sections.

use std::collections::BTreeMap;

use super::schema::{section_for_heading, SectionKey, SECTION_HEADINGS};

/// Similarity above which an unknown heading is reported as a likely typo.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Split a document body into sections keyed by [`SectionKey`].
///
/// A line `## <heading>` whose trimmed heading is in
/// [`SECTION_HEADINGS`] opens a section that runs until the next recognized
/// heading. Other `##` lines are ordinary text of the open section. Text
/// before the first recognized heading is discarded, and section text is
/// trimmed.
///
/// Unknown headings are logged at debug, or at warn when `warn_unknown` is
/// set.
///
/// # Example
///
/// ```rust
/// use casework_content::case_study::schema::SectionKey;
/// use casework_content::case_study::sections::split_sections;
///
/// let sections = split_sections("## Problem\nSlow.\n## Random Notes\nx\n## Solution\nFast.", false);
/// assert_eq!(sections[&SectionKey::Problem], "Slow.\n## Random Notes\nx");
/// assert_eq!(sections[&SectionKey::Solution], "Fast.");
/// assert!(!sections.contains_key(&SectionKey::Goals));
/// ```
pub fn split_sections(body: &str, warn_unknown: bool) -> BTreeMap<SectionKey, String> {
    let mut sections = BTreeMap::new();
    let mut current: Option<(SectionKey, Vec<&str>)> = None;

    for line in body.lines() {
        let Some(heading) = line.strip_prefix("## ").map(str::trim) else {
            if let Some((_, lines)) = current.as_mut() {
                lines.push(line);
            }
            continue;
        };

        match section_for_heading(heading) {
            Some(key) => {
                if let Some((open, lines)) = current.take() {
                    close_section(&mut sections, open, &lines);
                }
                current = Some((key, Vec::new()));
            }
            None => {
                report_unknown(heading, warn_unknown);
                if let Some((_, lines)) = current.as_mut() {
                    lines.push(line);
                }
            }
        }
    }

    if let Some((open, lines)) = current.take() {
        close_section(&mut sections, open, &lines);
    }
    sections
}

fn close_section(sections: &mut BTreeMap<SectionKey, String>, key: SectionKey, lines: &[&str]) {
    let text = lines.join("\n").trim().to_string();
    if sections.insert(key, text).is_some() {
        log::warn!(
            "Section '{}' appears more than once; keeping the last one",
            key.heading()
        );
    }
}

fn report_unknown(heading: &str, warn_unknown: bool) {
    let level = if warn_unknown {
        log::Level::Warn
    } else {
        log::Level::Debug
    };
    match closest_heading(heading) {
        Some(suggestion) => log::log!(
            level,
            "Unknown section heading '{heading}' (did you mean '{suggestion}'?)"
        ),
        None => log::log!(level, "Unknown section heading '{heading}'"),
    }
}

/// Recognized heading most similar to `heading`, if any is close enough.
fn closest_heading(heading: &str) -> Option<&'static str> {
    let needle = heading.to_lowercase();
    SECTION_HEADINGS
        .iter()
        .map(|entry| {
            let score = strsim::jaro_winkler(&needle, &entry.heading.to_lowercase());
            (entry.heading, score)
        })
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(name, _)| name)
}
