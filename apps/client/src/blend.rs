//! Resource blending and skill matching helpers.
//!
//! Blending is a heuristic relevance filter, not a ranked search: vetted
//! curated resources come first in catalog order, then AI suggestions in
//! returned order, de-duplicated by url with the first occurrence winning.

use std::collections::HashSet;

use crate::models::{CuratedResource, ResourceItem, RoadmapStep};

/// Merges curated catalog resources into an AI-suggested resource list.
///
/// A curated resource is vetted-relevant when any of its tags appears as a
/// substring of a lowercased roadmap-step title, or its own title contains a
/// step title as a substring. With no roadmap there is nothing to match
/// against and the suggestions pass through unchanged.
pub fn blend_resources(
    roadmap: &[RoadmapStep],
    curated: &[CuratedResource],
    suggested: &[ResourceItem],
) -> Vec<ResourceItem> {
    if roadmap.is_empty() || curated.is_empty() {
        return dedup_by_url(suggested.to_vec());
    }

    let step_titles: Vec<String> = roadmap.iter().map(|s| s.title.to_lowercase()).collect();

    let mut blended: Vec<ResourceItem> = curated
        .iter()
        .filter(|gr| {
            let tag_hit = gr.tags.iter().any(|t| {
                let tag = t.to_lowercase();
                step_titles.iter().any(|m| m.contains(&tag))
            });
            let title = gr.title.to_lowercase();
            let title_hit = step_titles.iter().any(|m| title.contains(m.as_str()));
            tag_hit || title_hit
        })
        .map(CuratedResource::as_item)
        .collect();

    blended.extend(suggested.iter().cloned());
    dedup_by_url(blended)
}

/// Keeps the first occurrence of each url.
pub fn dedup_by_url(items: Vec<ResourceItem>) -> Vec<ResourceItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.url.clone()))
        .collect()
}

/// Case-insensitive set difference: required skills the user does not have.
pub fn missing_skills(required: &[String], mine: &[String]) -> Vec<String> {
    let mine: HashSet<String> = mine.iter().map(|s| s.to_lowercase()).collect();
    required
        .iter()
        .filter(|s| !mine.contains(&s.to_lowercase()))
        .cloned()
        .collect()
}
