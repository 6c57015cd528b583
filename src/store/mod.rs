//! In-memory repository for users, contacts, deals and exchange rates.
//!
//! Every deal mutation is a whole-object replace under the write lock.

pub mod seed;

use crate::domain::{Contact, Deal, DealId, Decimal, Role, User, UserId};
use crate::engine::currency::{CurrencyError, ExchangeRateTable};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("deal {0} not found")]
    DealNotFound(DealId),
    #[error("user {0} not found")]
    UserNotFound(UserId),
    #[error("deal {0} already has sales order {1}")]
    SalesOrderExists(DealId, String),
    #[error(transparent)]
    Currency(#[from] CurrencyError),
}

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    contacts: Vec<Contact>,
    deals: Vec<Deal>,
    rates: ExchangeRateTable,
}

#[derive(Debug, Default)]
pub struct Repository {
    state: RwLock<State>,
}

impl Repository {
    pub fn new(rates: ExchangeRateTable) -> Self {
        Self {
            state: RwLock::new(State {
                rates,
                ..State::default()
            }),
        }
    }

    /// Repository preloaded with the demo pipeline.
    pub fn seeded(rates: ExchangeRateTable) -> Self {
        Self {
            state: RwLock::new(State {
                users: seed::users(),
                contacts: seed::contacts(),
                deals: seed::deals(),
                rates,
            }),
        }
    }

    pub async fn insert_user(&self, user: User) {
        let mut state = self.state.write().await;
        match state.users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user,
            None => state.users.push(user),
        }
    }

    pub async fn insert_contact(&self, contact: Contact) {
        let mut state = self.state.write().await;
        match state.contacts.iter_mut().find(|c| c.id == contact.id) {
            Some(existing) => *existing = contact,
            None => state.contacts.push(contact),
        }
    }

    /// Insert a new deal or replace the stored one with the same id.
    pub async fn upsert_deal(&self, deal: Deal) {
        let mut state = self.state.write().await;
        match state.deals.iter_mut().find(|d| d.id == deal.id) {
            Some(existing) => *existing = deal,
            None => state.deals.push(deal),
        }
    }

    pub async fn list_users(&self) -> Vec<User> {
        self.state.read().await.users.clone()
    }

    pub async fn get_user(&self, id: &UserId) -> Result<User, StoreError> {
        self.state
            .read()
            .await
            .users
            .iter()
            .find(|u| &u.id == id)
            .cloned()
            .ok_or_else(|| StoreError::UserNotFound(id.clone()))
    }

    pub async fn update_user_role(&self, id: &UserId, role: Role) -> Result<User, StoreError> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| StoreError::UserNotFound(id.clone()))?;
        user.role = role;
        tracing::info!(user = %id, %role, "role updated");
        Ok(user.clone())
    }

    pub async fn list_contacts(&self) -> Vec<Contact> {
        self.state.read().await.contacts.clone()
    }

    /// Snapshot of all deals in insertion order.
    pub async fn list_deals(&self) -> Vec<Deal> {
        self.state.read().await.deals.clone()
    }

    pub async fn get_deal(&self, id: &DealId) -> Result<Deal, StoreError> {
        self.state
            .read()
            .await
            .deals
            .iter()
            .find(|d| &d.id == id)
            .cloned()
            .ok_or_else(|| StoreError::DealNotFound(id.clone()))
    }

    /// Read-modify-replace of one deal under a single write lock.
    pub async fn update_deal<F>(&self, id: &DealId, f: F) -> Result<Deal, StoreError>
    where
        F: FnOnce(&Deal) -> Result<Deal, StoreError>,
    {
        let mut state = self.state.write().await;
        let slot = state
            .deals
            .iter_mut()
            .find(|d| &d.id == id)
            .ok_or_else(|| StoreError::DealNotFound(id.clone()))?;
        let updated = f(slot)?;
        *slot = updated.clone();
        Ok(updated)
    }

    pub async fn rates(&self) -> ExchangeRateTable {
        self.state.read().await.rates.clone()
    }

    pub async fn set_rate(&self, currency: &str, rate: Decimal) -> Result<ExchangeRateTable, StoreError> {
        let mut state = self.state.write().await;
        state.rates.set(currency, rate)?;
        tracing::info!(currency, rate = %rate, "exchange rate updated");
        Ok(state.rates.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Stage;

    #[tokio::test]
    async fn test_seeded_repository() {
        let repo = Repository::seeded(ExchangeRateTable::with_defaults());
        assert_eq!(repo.list_users().await.len(), 6);
        assert_eq!(repo.list_contacts().await.len(), 6);
        assert_eq!(repo.list_deals().await.len(), 5);
    }

    #[tokio::test]
    async fn test_update_deal_keeps_order() {
        let repo = Repository::seeded(ExchangeRateTable::with_defaults());
        repo.update_deal(&DealId::new("2"), |deal| {
            Ok(Deal {
                stage: Stage::Closed,
                ..deal.clone()
            })
        })
        .await
        .unwrap();

        let deals = repo.list_deals().await;
        assert_eq!(deals[1].id, DealId::new("2"));
        assert_eq!(deals[1].stage, Stage::Closed);
    }

    #[tokio::test]
    async fn test_missing_deal() {
        let repo = Repository::new(ExchangeRateTable::new());
        let err = repo.get_deal(&DealId::new("nope")).await.unwrap_err();
        assert!(matches!(err, StoreError::DealNotFound(_)));

        assert!(matches!(
            repo.update_deal(&DealId::new("nope"), |d| Ok(d.clone())).await,
            Err(StoreError::DealNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_deal_propagates_closure_error() {
        let repo = Repository::seeded(ExchangeRateTable::with_defaults());
        let id = DealId::new("1");
        let result = repo
            .update_deal(&id, |d| Err(StoreError::SalesOrderExists(d.id.clone(), "SO-1".into())))
            .await;
        assert!(matches!(result, Err(StoreError::SalesOrderExists(..))));
    }

    #[tokio::test]
    async fn test_update_user_role() {
        let repo = Repository::seeded(ExchangeRateTable::with_defaults());
        let user = repo
            .update_user_role(&UserId::new("u1"), Role::Admin)
            .await
            .unwrap();
        assert_eq!(user.role, Role::Admin);
        assert!(matches!(
            repo.update_user_role(&UserId::new("u99"), Role::Admin).await,
            Err(StoreError::UserNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_set_rate_validates() {
        let repo = Repository::new(ExchangeRateTable::new());
        assert!(repo.set_rate("EUR", Decimal::zero()).await.is_err());
        let table = repo.set_rate("EUR", Decimal::from_parts(93, 2)).await.unwrap();
        assert_eq!(table.get("EUR"), Some(Decimal::from_parts(93, 2)));
    }

    #[tokio::test]
    async fn test_upsert_deal_appends_new() {
        let repo = Repository::new(ExchangeRateTable::new());
        let deal = seed::deals().remove(0);
        repo.upsert_deal(deal.clone()).await;
        repo.upsert_deal(deal).await;
        assert_eq!(repo.list_deals().await.len(), 1);
    }
}
