use crate::api::AppState;
use crate::domain::{Contact, DealId};
use crate::engine::contacts::{self, ContactFilter};
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactsQuery {
    pub search: Option<String>,
    pub company: Option<String>,
    pub deal_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactsResponse {
    pub contacts: Vec<Contact>,
    /// Every company in the directory, for the filter dropdown.
    pub companies: Vec<String>,
}

pub async fn get_contacts(
    Query(params): Query<ContactsQuery>,
    State(state): State<AppState>,
) -> Json<ContactsResponse> {
    let all = state.repo.list_contacts().await;
    let deals = state.repo.list_deals().await;
    let filter = ContactFilter {
        search: params.search,
        company: params.company.filter(|c| !c.is_empty()),
        deal_id: params.deal_id.filter(|d| !d.is_empty()).map(DealId::new),
    };

    let matched = contacts::filter_contacts(&all, &deals, &filter)
        .into_iter()
        .cloned()
        .collect();
    let companies = contacts::companies(&all)
        .into_iter()
        .map(str::to_string)
        .collect();

    Json(ContactsResponse {
        contacts: matched,
        companies,
    })
}
