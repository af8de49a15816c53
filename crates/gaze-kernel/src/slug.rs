//! Slug resolution for widget instances.
//!
//! A widget's slug is its key in the results map. It comes from, in order:
//! an explicit `slug`, the slugified `title`, or `"{type}-{index}"` where
//! `index` is the widget's position in the sequence being walked.

use gaze_types::{WidgetConfig, WidgetSlug};
use std::collections::HashSet;
use tracing::warn;

/// Lowercase `input`, turn whitespace runs into single hyphens and drop every
/// character that is not `[a-z0-9-]`.
///
/// `"Tech News!"` becomes `"tech-news"`. Leading and trailing hyphens are
/// trimmed, so a title made only of punctuation yields an empty string.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for c in input.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
    }

    slug
}

/// Resolve the slug of `config` at position `index` in its sequence.
///
/// An empty explicit slug counts as absent. A title that slugifies to nothing
/// falls through to the positional form.
pub fn resolve_slug(config: &WidgetConfig, index: usize) -> WidgetSlug {
    if let Some(slug) = config.explicit_slug().filter(|s| !s.trim().is_empty()) {
        return WidgetSlug::new(slug);
    }

    if let Some(title) = config.title() {
        let slug = slugify(title);
        if !slug.is_empty() {
            return WidgetSlug::new(slug);
        }
    }

    WidgetSlug::new(format!("{}-{}", config.type_name(), index))
}

/// Tracks the slugs already handed out within one scope (a page, or one
/// container's children) and disambiguates collisions.
///
/// The first widget keeps its slug; later ones get `-2`, `-3`, ... appended.
#[derive(Debug, Default)]
pub struct SlugScope {
    claimed: HashSet<WidgetSlug>,
}

impl SlugScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve and reserve a unique slug for `config` at `index`.
    pub fn claim(&mut self, config: &WidgetConfig, index: usize) -> WidgetSlug {
        let base = resolve_slug(config, index);
        if self.claimed.insert(base.clone()) {
            return base;
        }

        let mut n = 2;
        let unique = loop {
            let candidate = WidgetSlug::new(format!("{base}-{n}"));
            if !self.claimed.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };

        if config.explicit_slug().is_some() {
            warn!(
                slug = %base,
                renamed = %unique,
                widget_type = config.type_name(),
                "Duplicate explicit widget slug"
            );
        }

        self.claimed.insert(unique.clone());
        unique
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}
