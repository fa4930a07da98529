use crate::clients::actor_client::ActorClient;
use crate::framework::{Filter, ResourceClient, TickerCommand};
use crate::model::{
    active_tables, seed_orders, Catalog, Order, OrderCreate, OrderId, OrderLine, OrderStatus,
    OrderUpdate, StatusCounts, TodayStats,
};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Client for the order store.
///
/// Mutations and the by-status view run inside the actor; the statistics are
/// computed here over a single snapshot, so they are never torn by a
/// concurrent write.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    catalog: Arc<Catalog>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, catalog: Arc<Catalog>) -> Self {
        Self { inner, catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Loads the example orders. Only the first call per store succeeds.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Result<usize, OrderError> {
        let orders = seed_orders(&self.catalog, Utc::now())?;
        let count = self.inner.seed(orders).await?;
        info!(count, "Store initialized");
        Ok(count)
    }

    /// Creates an order from the given lines. The store assigns id, timestamp
    /// and total.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn add_order(
        &self,
        customer_name: &str,
        table_number: Option<u32>,
        lines: Vec<OrderLine>,
        status: OrderStatus,
    ) -> Result<Order, OrderError> {
        let payload = OrderCreate {
            customer_name: customer_name.to_string(),
            table_number,
            lines,
            status,
        };
        debug!(?payload, "add_order called");
        let order = self.inner.create(payload).await?;
        info!(order_id = %order.id, total = order.total, "Order added");
        Ok(order)
    }

    /// Creates an order from `(menu item id, quantity)` pairs.
    ///
    /// # Errors
    /// [`OrderError::UnknownMenuItem`] if an id is not in the catalog, plus the
    /// validation errors of [`add_order`](Self::add_order).
    pub async fn add_order_by_ids(
        &self,
        customer_name: &str,
        table_number: Option<u32>,
        items: &[(&str, u32)],
        status: OrderStatus,
    ) -> Result<Order, OrderError> {
        let lines = items
            .iter()
            .map(|&(item_id, quantity)| {
                self.catalog
                    .get(item_id)
                    .cloned()
                    .map(|item| OrderLine::new(item, quantity))
                    .ok_or_else(|| OrderError::UnknownMenuItem(item_id.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.add_order(customer_name, table_number, lines, status).await
    }

    /// Replaces the status of an order. Returns `None` if the id is unknown.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, OrderError> {
        Ok(self.inner.update(id, OrderUpdate::SetStatus(status)).await?)
    }

    /// Like [`update_status`](Self::update_status), with the status given as
    /// its lowercase name.
    pub async fn update_status_str(
        &self,
        id: OrderId,
        status: &str,
    ) -> Result<Option<Order>, OrderError> {
        let status = status.parse::<OrderStatus>()?;
        self.update_status(id, status).await
    }

    /// Moves an order one step along its lifecycle. Completed orders stay
    /// completed.
    #[instrument(skip(self))]
    pub async fn advance_status(&self, id: OrderId) -> Result<Option<Order>, OrderError> {
        Ok(self.inner.update(id, OrderUpdate::Advance).await?)
    }

    pub async fn delete_order(&self, id: OrderId) -> Result<bool, OrderError> {
        self.delete(id).await
    }

    pub async fn get_order(&self, id: OrderId) -> Result<Option<Order>, OrderError> {
        self.get(id).await
    }

    /// All orders, newest first.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.inner.list(None).await?)
    }

    /// Orders with the given status, in store order.
    #[instrument(skip(self))]
    pub async fn list_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        let filter: Filter<Order> = Box::new(move |order: &Order| order.status == status);
        Ok(self.inner.list(Some(filter)).await?)
    }

    pub async fn today_stats(&self) -> Result<TodayStats, OrderError> {
        let orders = self.list_orders().await?;
        Ok(TodayStats::today(&orders))
    }

    pub async fn status_counts(&self) -> Result<StatusCounts, OrderError> {
        let orders = self.list_orders().await?;
        Ok(StatusCounts::from_orders(&orders))
    }

    pub async fn active_tables(&self) -> Result<usize, OrderError> {
        let orders = self.list_orders().await?;
        Ok(active_tables(&orders))
    }

    /// Flips the generator on or off and returns the new state.
    #[instrument(skip(self))]
    pub async fn toggle_simulation(&self) -> Result<bool, OrderError> {
        let enabled = self.inner.ticker(TickerCommand::Toggle).await?;
        info!(enabled, "Simulation toggled");
        Ok(enabled)
    }

    /// Starts or stops the generator. Idempotent.
    #[instrument(skip(self))]
    pub async fn set_simulation(&self, enabled: bool) -> Result<bool, OrderError> {
        let command = if enabled {
            TickerCommand::Start
        } else {
            TickerCommand::Stop
        };
        Ok(self.inner.ticker(command).await?)
    }

    pub async fn is_simulating(&self) -> Result<bool, OrderError> {
        Ok(self.inner.ticker(TickerCommand::Status).await?)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_list, expect_seed, expect_ticker, expect_update};
    use crate::framework::FrameworkError;

    fn mock_client() -> (
        OrderClient,
        tokio::sync::mpsc::Receiver<crate::framework::ResourceRequest<Order>>,
    ) {
        let (inner, receiver) = create_mock_client::<Order>(10);
        (OrderClient::new(inner, Arc::new(Catalog::cafe())), receiver)
    }

    #[tokio::test]
    async fn test_initialize_sends_fixture_and_maps_rejection() {
        let (client, mut receiver) = mock_client();

        let task = tokio::spawn(async move { client.initialize().await });
        let (items, responder) = expect_seed(&mut receiver).await.expect("Expected Seed request");
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id, OrderId::from("ORD001"));
        responder.send(Err(FrameworkError::AlreadySeeded)).unwrap();

        assert_eq!(task.await.unwrap(), Err(OrderError::AlreadyInitialized));
    }

    #[tokio::test]
    async fn test_update_status_unwraps_entity_error() {
        let (client, mut receiver) = mock_client();

        let task = tokio::spawn(async move {
            client.update_status("ORD1".into(), OrderStatus::Completed).await
        });
        let (id, update, responder) = expect_update(&mut receiver).await.expect("Expected Update");
        assert_eq!(id, OrderId::from("ORD1"));
        assert_eq!(update, OrderUpdate::SetStatus(OrderStatus::Completed));
        let rejection = OrderError::IllegalTransition {
            from: OrderStatus::New,
            to: OrderStatus::Completed,
        };
        responder
            .send(Err(FrameworkError::EntityError(Box::new(rejection.clone()))))
            .unwrap();

        assert_eq!(task.await.unwrap(), Err(rejection));
    }

    #[tokio::test]
    async fn test_list_by_status_filters_inside_the_actor() {
        let (client, mut receiver) = mock_client();
        let orders = seed_orders(&Catalog::cafe(), Utc::now()).unwrap();

        let task = tokio::spawn(async move { client.list_by_status(OrderStatus::Ready).await });
        let (filter, responder) = expect_list(&mut receiver).await.expect("Expected List");
        let filter = filter.expect("Expected a filter");
        let matched: Vec<Order> = orders.into_iter().filter(|order| filter(order)).collect();
        responder.send(Ok(matched)).unwrap();

        let ready = task.await.unwrap().unwrap();
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].id, OrderId::from("ORD003"));
    }

    #[tokio::test]
    async fn test_set_simulation_sends_idempotent_commands() {
        let (client, mut receiver) = mock_client();

        let task = tokio::spawn(async move { client.set_simulation(false).await });
        let (command, responder) = expect_ticker(&mut receiver).await.expect("Expected Ticker");
        assert_eq!(command, TickerCommand::Stop);
        responder.send(Ok(false)).unwrap();
        assert_eq!(task.await.unwrap(), Ok(false));
    }

    #[tokio::test]
    async fn test_unknown_inputs_fail_before_reaching_the_actor() {
        let (client, mut receiver) = mock_client();

        let err = client
            .add_order_by_ids("Rani Kartika", Some(2), &[("zz9", 1)], OrderStatus::New)
            .await
            .unwrap_err();
        assert_eq!(err, OrderError::UnknownMenuItem("zz9".into()));

        let err = client.update_status_str("ORD1".into(), "cancelled").await.unwrap_err();
        assert_eq!(err, OrderError::InvalidStatus("cancelled".into()));

        drop(client);
        assert!(receiver.recv().await.is_none());
    }
}
