//! Order storage interface and the in-memory implementation behind it.
//!
//! Orders are owned by the host commerce system; this store only keeps the
//! snapshots it pushed plus the payment state this service layers on top.

use std::collections::HashMap;

use async_trait::async_trait;
use monek_connector::types::OrderSnapshot;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::types::{Order, OrderNote, OrderStatus, OrderUpdate};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("order {0} already exists")]
    DuplicateOrder(u64),
    #[error("order {0} not found")]
    OrderNotFound(u64),
    #[error("no order carries payment reference {0}")]
    ReferenceNotFound(String),
}

/// Storage seam, so request handlers never touch a concrete store.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert_order(&self, snapshot: OrderSnapshot) -> Result<Order, StorageError>;

    async fn find_order(&self, order_id: u64) -> Result<Order, StorageError>;

    /// Most recently created order whose payment-reference metadata equals
    /// `reference`, across any status.
    async fn find_by_payment_reference(&self, reference: &str) -> Result<Order, StorageError>;

    /// Applies status, metadata and note changes to one order in a single
    /// read-modify-write, returning the updated order.
    async fn update_order(&self, order_id: u64, update: OrderUpdate)
        -> Result<Order, StorageError>;
}

/// Mutex-guarded map keyed by order id. Mutations from concurrent checkout
/// and webhook requests serialize on the lock.
#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: Mutex<HashMap<u64, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert_order(&self, snapshot: OrderSnapshot) -> Result<Order, StorageError> {
        let mut orders = self.orders.lock().await;
        let order_id = snapshot.order_id;
        if orders.contains_key(&order_id) {
            return Err(StorageError::DuplicateOrder(order_id));
        }
        let order = Order {
            snapshot,
            status: OrderStatus::Pending,
            created_at: OffsetDateTime::now_utc(),
            metadata: HashMap::new(),
            notes: Vec::new(),
        };
        orders.insert(order_id, order.clone());
        Ok(order)
    }

    async fn find_order(&self, order_id: u64) -> Result<Order, StorageError> {
        self.orders
            .lock()
            .await
            .get(&order_id)
            .cloned()
            .ok_or(StorageError::OrderNotFound(order_id))
    }

    async fn find_by_payment_reference(&self, reference: &str) -> Result<Order, StorageError> {
        self.orders
            .lock()
            .await
            .values()
            .filter(|order| {
                order.metadata_str(crate::consts::META_PAYMENT_REFERENCE) == Some(reference)
            })
            .max_by_key(|order| (order.created_at, order.order_id()))
            .cloned()
            .ok_or_else(|| StorageError::ReferenceNotFound(reference.to_string()))
    }

    async fn update_order(
        &self,
        order_id: u64,
        update: OrderUpdate,
    ) -> Result<Order, StorageError> {
        let mut orders = self.orders.lock().await;
        let order = orders
            .get_mut(&order_id)
            .ok_or(StorageError::OrderNotFound(order_id))?;

        if let Some(status) = update.status {
            order.status = status;
        }
        for (key, value) in update.metadata {
            order.metadata.insert(key, value);
        }
        for note in update.notes {
            order.notes.push(OrderNote {
                created_at: OffsetDateTime::now_utc(),
                note,
            });
        }
        Ok(order.clone())
    }
}
