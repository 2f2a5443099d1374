//! Named category filters used by presentation.
//!
//! The "Cinematography" filter deliberately covers every motion category.
//! Keeping the mapping here, rather than inline in a view, makes the policy
//! visible and testable.

use serde::{Deserialize, Serialize};

use crate::document::{GalleryEntry, PackageCategory, ServicePackage, WorkCategory};

/// How many entries the home-page preview shows.
pub const PREVIEW_LIMIT: usize = 4;

/// A gallery filter label as offered to visitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkFilter {
  #[default]
  All,
  Photography,
  Cinematography,
}

impl WorkFilter {
  /// The categories a filter label admits.
  pub fn categories(&self) -> &'static [WorkCategory] {
    match self {
      Self::All => &WorkCategory::ALL,
      Self::Photography => &[WorkCategory::Photography],
      Self::Cinematography => &[
        WorkCategory::Cinematography,
        WorkCategory::Commercial,
        WorkCategory::Documentary,
      ],
    }
  }

  pub fn admits(&self, category: WorkCategory) -> bool {
    self.categories().contains(&category)
  }
}

/// Entries admitted by `filter`, in document order. `preview` truncates to
/// [`PREVIEW_LIMIT`].
pub fn filter_gallery(
  entries: &[GalleryEntry],
  filter: WorkFilter,
  preview: bool,
) -> Vec<&GalleryEntry> {
  let limit = if preview { PREVIEW_LIMIT } else { usize::MAX };
  entries
    .iter()
    .filter(|e| filter.admits(e.category))
    .take(limit)
    .collect()
}

pub fn packages_in(
  packages: &[ServicePackage],
  category: PackageCategory,
) -> Vec<&ServicePackage> {
  packages.iter().filter(|p| p.category == category).collect()
}
