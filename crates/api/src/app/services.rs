use std::sync::Arc;

use vendorhub_analytics::ReorderRecommender;
use vendorhub_infra::{ConnectionService, InMemoryOrderStore, InMemoryProductStore};

use crate::config::AppConfig;

type Recommender = ReorderRecommender<Arc<InMemoryOrderStore>, Arc<InMemoryProductStore>>;

/// Shared application services, one instance per process.
pub struct AppServices {
    orders: Arc<InMemoryOrderStore>,
    products: Arc<InMemoryProductStore>,
    recommender: Recommender,
    connections: ConnectionService,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Self {
        let orders = Arc::new(InMemoryOrderStore::new());
        let products = Arc::new(InMemoryProductStore::new());
        let recommender =
            ReorderRecommender::new(orders.clone(), products.clone()).with_policy(config.policy);

        Self {
            orders,
            products,
            recommender,
            connections: ConnectionService::default(),
        }
    }

    pub fn orders(&self) -> &InMemoryOrderStore {
        &self.orders
    }

    pub fn products(&self) -> &InMemoryProductStore {
        &self.products
    }

    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }

    pub fn connections(&self) -> &ConnectionService {
        &self.connections
    }
}
