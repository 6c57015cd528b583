//! Role-based deal visibility combined with smart-search filtering.

use super::search::{self, ParsedQuery, SearchField};
use crate::domain::{Deal, User};

/// Deals the viewer may see that also match `query`, in source order.
///
/// Sales reps see only the deals they own; every other role sees all deals.
/// Of the parsed fields only `country` and `stage` narrow the result;
/// `company`, `owner` and `tag` are recognized by the parser but not applied.
pub fn filter_deals<'a>(deals: &'a [Deal], viewer: &User, query: &str) -> Vec<&'a Deal> {
    let owned = deals.iter().filter(|deal| can_view(viewer, deal));

    if query.is_empty() {
        return owned.collect();
    }

    let parsed = search::parse(query);
    let phrase = parsed.phrase();
    let visible: Vec<&Deal> = owned
        .filter(|deal| matches_fields(deal, &parsed))
        .filter(|deal| phrase.as_deref().map_or(true, |p| matches_phrase(deal, p)))
        .collect();

    tracing::debug!(
        viewer = %viewer.id,
        role = %viewer.role,
        query,
        visible = visible.len(),
        "filtered deals"
    );
    visible
}

/// Ownership gate alone.
pub fn can_view(viewer: &User, deal: &Deal) -> bool {
    !viewer.role.sees_only_own_deals() || deal.owner_id == viewer.id
}

fn matches_fields(deal: &Deal, parsed: &ParsedQuery) -> bool {
    if let Some(country) = parsed.field(SearchField::Country) {
        if !deal.country.to_lowercase().contains(country) {
            return false;
        }
    }
    if let Some(stage) = parsed.field(SearchField::Stage) {
        if !deal.stage.as_str().to_lowercase().contains(stage) {
            return false;
        }
    }
    true
}

fn matches_phrase(deal: &Deal, phrase: &str) -> bool {
    deal.title.to_lowercase().contains(phrase)
        || deal.company.to_lowercase().contains(phrase)
        || deal.contact_name.to_lowercase().contains(phrase)
}
