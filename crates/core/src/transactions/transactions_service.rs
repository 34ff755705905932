use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::transactions_model::{
    NewTransaction, Transaction, TransactionFilters, TransactionSort, TransactionUpdate,
};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink, NoOpDomainEventSink};
use crate::pagination::{PageRequest, Paginated};

/// Service for managing a user's transactions.
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        Self {
            repository,
            event_sink: Arc::new(NoOpDomainEventSink),
        }
    }

    pub fn with_event_sink(mut self, event_sink: Arc<dyn DomainEventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn list_transactions(
        &self,
        user_id: &str,
        filters: &TransactionFilters,
        sort: &TransactionSort,
        page: &PageRequest,
    ) -> Result<Paginated<Transaction>> {
        page.validate()?;
        self.repository.search(user_id, filters, sort, page)
    }

    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        self.repository.get_by_id(user_id, transaction_id)
    }

    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        new_transaction.validate()?;
        debug!("Creating transaction for user {}", user_id);
        let created = self.repository.insert(user_id, new_transaction).await?;
        self.event_sink
            .emit(DomainEvent::transactions_changed(user_id));
        Ok(created)
    }

    async fn update_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        update.validate()?;
        // Ownership check happens here: a foreign-owned id reads as NotFound.
        let mut transaction = self.repository.get_by_id(user_id, transaction_id)?;
        update.apply(&mut transaction);
        let updated = self.repository.update(user_id, transaction).await?;
        self.event_sink
            .emit(DomainEvent::transactions_changed(user_id));
        Ok(updated)
    }

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<()> {
        self.repository.delete(user_id, transaction_id).await?;
        self.event_sink
            .emit(DomainEvent::transactions_changed(user_id));
        Ok(())
    }
}
