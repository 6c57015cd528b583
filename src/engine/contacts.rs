//! Contacts directory filtering.

use crate::domain::{Contact, Deal, DealId};

/// Directory filters; unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    /// Substring over name, email or company, case-insensitive.
    pub search: Option<String>,
    /// Exact company name.
    pub company: Option<String>,
    /// Only contacts attached to this deal.
    pub deal_id: Option<DealId>,
}

pub fn filter_contacts<'a>(
    contacts: &'a [Contact],
    deals: &[Deal],
    filter: &ContactFilter,
) -> Vec<&'a Contact> {
    let search = filter
        .search
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();

    // Unknown deal id: the deal filter matches nobody.
    let deal_contacts = filter
        .deal_id
        .as_ref()
        .map(|id| deals.iter().find(|deal| &deal.id == id).map(|deal| &deal.contact_ids));

    contacts
        .iter()
        .filter(|contact| {
            contact.name.to_lowercase().contains(&search)
                || contact.email.to_lowercase().contains(&search)
                || contact.company.to_lowercase().contains(&search)
        })
        .filter(|contact| {
            filter
                .company
                .as_deref()
                .map_or(true, |company| contact.company == company)
        })
        .filter(|contact| match deal_contacts {
            None => true,
            Some(None) => false,
            Some(Some(ids)) => ids.contains(&contact.id),
        })
        .collect()
}

/// Distinct company names in first-seen order.
pub fn companies(contacts: &[Contact]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for contact in contacts {
        if !seen.contains(&contact.company.as_str()) {
            seen.push(&contact.company);
        }
    }
    seen
}
