use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use uuid::Uuid;

use pocketledger_core::errors::Error;
use pocketledger_core::pagination::{PageRequest, Paginated};
use pocketledger_core::transactions::{
    NewTransaction, SortOrder, Transaction, TransactionFilters, TransactionRepositoryTrait,
    TransactionSort, TransactionSortField,
};
use pocketledger_core::Result;

use super::model::TransactionDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::transactions;

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TransactionRepository { pool, writer }
    }

    /// Builds the owner-scoped filter chain. Called twice per search (rows +
    /// count) because boxed queries cannot be cloned.
    fn filtered(
        user_id: &str,
        filters: &TransactionFilters,
    ) -> transactions::BoxedQuery<'static, Sqlite> {
        let mut query = transactions::table
            .into_boxed()
            .filter(transactions::user_id.eq(user_id.to_string()));

        if let Some(transaction_type) = filters.transaction_type {
            query = query.filter(transactions::transaction_type.eq(transaction_type.as_str()));
        }
        if let Some(category) = &filters.category {
            query = query.filter(transactions::category.like(format!("%{}%", category)));
        }
        if let Some(start_date) = filters.start_date {
            query = query.filter(transactions::date.ge(start_date));
        }
        if let Some(end_date) = filters.end_date {
            query = query.filter(transactions::date.le(end_date));
        }
        if let Some(search) = &filters.search {
            let pattern = format!("%{}%", search);
            query = query.filter(
                transactions::description
                    .like(pattern.clone())
                    .or(transactions::category.like(pattern)),
            );
        }
        query
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn search(
        &self,
        user_id: &str,
        filters: &TransactionFilters,
        sort: &TransactionSort,
        page: &PageRequest,
    ) -> Result<Paginated<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let total: i64 = Self::filtered(user_id, filters)
            .count()
            .get_result(&mut conn)
            .into_core()?;

        let query = Self::filtered(user_id, filters);
        let query = match (sort.field, sort.order) {
            (TransactionSortField::Date, SortOrder::Asc) => query.order(transactions::date.asc()),
            (TransactionSortField::Date, SortOrder::Desc) => query.order(transactions::date.desc()),
            (TransactionSortField::Amount, SortOrder::Asc) => {
                query.order(transactions::amount.asc())
            }
            (TransactionSortField::Amount, SortOrder::Desc) => {
                query.order(transactions::amount.desc())
            }
            (TransactionSortField::Category, SortOrder::Asc) => {
                query.order(transactions::category.asc())
            }
            (TransactionSortField::Category, SortOrder::Desc) => {
                query.order(transactions::category.desc())
            }
            (TransactionSortField::CreatedAt, SortOrder::Asc) => {
                query.order(transactions::created_at.asc())
            }
            (TransactionSortField::CreatedAt, SortOrder::Desc) => {
                query.order(transactions::created_at.desc())
            }
        };

        let rows = query
            .limit(page.limit)
            .offset(page.offset())
            .load::<TransactionDB>(&mut conn)
            .into_core()?;

        Ok(Paginated::new(
            rows.into_iter().map(Transaction::from).collect(),
            total,
            page,
        ))
    }

    fn get_by_id(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        let row = transactions::table
            .find(transaction_id)
            .filter(transactions::user_id.eq(user_id))
            .first::<TransactionDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::not_found("Transaction"))?;
        Ok(Transaction::from(row))
    }

    fn list_in_range(
        &self,
        user_id: &str,
        start_date: Option<NaiveDateTime>,
        end_date: Option<NaiveDateTime>,
    ) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = transactions::table
            .into_boxed()
            .filter(transactions::user_id.eq(user_id.to_string()));
        if let Some(start_date) = start_date {
            query = query.filter(transactions::date.ge(start_date));
        }
        if let Some(end_date) = end_date {
            query = query.filter(transactions::date.le(end_date));
        }
        let rows = query
            .order(transactions::date.asc())
            .load::<TransactionDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    fn list_expenses_in_category(
        &self,
        user_id: &str,
        category: &str,
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
    ) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .filter(transactions::transaction_type.eq("expense"))
            .filter(transactions::category.eq(category))
            .filter(transactions::date.ge(start_date))
            .filter(transactions::date.le(end_date))
            .order(transactions::date.asc())
            .load::<TransactionDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    async fn insert(&self, user_id: &str, new_transaction: NewTransaction) -> Result<Transaction> {
        let now = Utc::now().naive_utc();
        let date = new_transaction.date.unwrap_or(now);

        // Seed next_due_date from the transaction date; nothing in the
        // system advances it afterwards.
        let recurring_pattern = new_transaction.recurring_pattern.map(|mut pattern| {
            if pattern.next_due_date.is_none() {
                pattern.next_due_date = Some(date);
            }
            pattern
        });

        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            transaction_type: new_transaction.transaction_type,
            amount: new_transaction.amount,
            description: new_transaction.description,
            category: new_transaction.category,
            subcategory: new_transaction.subcategory,
            date,
            payment_method: new_transaction.payment_method.unwrap_or_default(),
            tags: new_transaction.tags,
            is_recurring: new_transaction.is_recurring,
            recurring_pattern,
            notes: new_transaction.notes,
            is_verified: false,
            created_at: now,
            updated_at: now,
        };
        let row = TransactionDB::from(transaction);

        self.writer
            .exec(move |conn| {
                let created = diesel::insert_into(transactions::table)
                    .values(&row)
                    .returning(TransactionDB::as_returning())
                    .get_result::<TransactionDB>(conn)
                    .into_core()?;
                Ok(Transaction::from(created))
            })
            .await
    }

    async fn update(&self, user_id: &str, mut transaction: Transaction) -> Result<Transaction> {
        transaction.updated_at = Utc::now().naive_utc();
        let transaction_id = transaction.id.clone();
        let owner = user_id.to_string();
        let row = TransactionDB::from(transaction);

        self.writer
            .exec(move |conn| {
                let affected = diesel::update(
                    transactions::table
                        .find(&transaction_id)
                        .filter(transactions::user_id.eq(&owner)),
                )
                .set(&row)
                .execute(conn)
                .into_core()?;
                if affected == 0 {
                    return Err(Error::not_found("Transaction"));
                }
                let updated = transactions::table
                    .find(&transaction_id)
                    .first::<TransactionDB>(conn)
                    .into_core()?;
                Ok(Transaction::from(updated))
            })
            .await
    }

    async fn delete(&self, user_id: &str, transaction_id: &str) -> Result<usize> {
        let transaction_id = transaction_id.to_string();
        let owner = user_id.to_string();

        self.writer
            .exec(move |conn| {
                let deleted = diesel::delete(
                    transactions::table
                        .find(&transaction_id)
                        .filter(transactions::user_id.eq(&owner)),
                )
                .execute(conn)
                .into_core()?;
                if deleted == 0 {
                    return Err(Error::not_found("Transaction"));
                }
                Ok(deleted)
            })
            .await
    }
}
