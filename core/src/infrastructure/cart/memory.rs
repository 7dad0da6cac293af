use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;

use crate::domain::{
    cart::{entities::Cart, ports::CartStorage},
    common::entities::app_errors::CoreError,
};

/// Process-local cart storage. Carts live as long as the server does.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCartStorage {
    carts: Arc<RwLock<HashMap<String, Cart>>>,
}

impl InMemoryCartStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn store(carts: &mut HashMap<String, Cart>, session: String, cart: Cart) {
    if cart.is_empty() {
        carts.remove(&session);
    } else {
        carts.insert(session, cart);
    }
}

impl CartStorage for InMemoryCartStorage {
    async fn load(&self, session: String) -> Result<Cart, CoreError> {
        let carts = self.carts.read().await;
        Ok(carts.get(&session).cloned().unwrap_or_default())
    }

    async fn update<T, F>(&self, session: String, apply: F) -> Result<T, CoreError>
    where
        T: Send,
        F: FnOnce(&mut Cart) -> Result<T, CoreError> + Send,
    {
        // held across load, apply and store
        let mut carts = self.carts.write().await;
        let mut cart = carts.get(&session).cloned().unwrap_or_default();

        let outcome = apply(&mut cart)?;
        store(&mut carts, session, cart);
        Ok(outcome)
    }

    async fn save(&self, session: String, cart: Cart) -> Result<(), CoreError> {
        let mut carts = self.carts.write().await;
        store(&mut carts, session, cart);
        Ok(())
    }

    async fn discard(&self, session: String) -> Result<(), CoreError> {
        self.carts.write().await.remove(&session);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::*;
    use crate::domain::cart::entities::CartItem;

    fn cart() -> Cart {
        Cart {
            items: vec![CartItem {
                variant_id: Uuid::from_u128(1),
                product_id: Uuid::from_u128(2),
                name: "Blazer Mid".to_string(),
                sku: "BLZ-1".to_string(),
                unit_price: Decimal::from(95),
                quantity: 1,
            }],
        }
    }

    #[tokio::test]
    async fn test_unknown_session_loads_empty_cart() {
        let storage = InMemoryCartStorage::new();
        assert_eq!(storage.load("missing".to_string()).await, Ok(Cart::default()));
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let storage = InMemoryCartStorage::new();
        storage.save("a".to_string(), cart()).await.unwrap();

        assert_eq!(storage.load("a".to_string()).await.unwrap(), cart());
        assert!(storage.load("b".to_string()).await.unwrap().is_empty());

        storage.discard("a".to_string()).await.unwrap();
        assert!(storage.load("a".to_string()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_update_leaves_cart_untouched() {
        let storage = InMemoryCartStorage::new();
        storage.save("a".to_string(), cart()).await.unwrap();

        let failed = storage
            .update("a".to_string(), |cart| {
                cart.clear();
                Err::<(), _>(CoreError::Invalid("rejected".to_string()))
            })
            .await;
        assert!(failed.is_err());
        assert_eq!(storage.load("a".to_string()).await.unwrap(), cart());

        let total = storage
            .update("a".to_string(), |cart| {
                cart.update_quantity(Uuid::from_u128(1), 3)?;
                Ok(cart.total_items())
            })
            .await;
        assert_eq!(total, Ok(3));
        assert_eq!(storage.load("a".to_string()).await.unwrap().total_items(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_updates_are_not_lost() {
        let storage = InMemoryCartStorage::new();
        storage.save("a".to_string(), cart()).await.unwrap();

        let handles = (0..8)
            .map(|_| {
                let storage = storage.clone();
                tokio::spawn(async move {
                    storage
                        .update("a".to_string(), |cart| {
                            let quantity = cart.total_items() as i32 + 1;
                            cart.update_quantity(Uuid::from_u128(1), quantity)
                        })
                        .await
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(storage.load("a".to_string()).await.unwrap().total_items(), 9);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let storage = InMemoryCartStorage::new();
        let other = storage.clone();
        storage.save("a".to_string(), cart()).await.unwrap();

        assert_eq!(other.load("a".to_string()).await.unwrap(), cart());
    }
}
