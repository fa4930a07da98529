//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and the receiving end of its channel.
//! Then use helpers like [`expect_create`] or [`expect_update`] to pull the next
//! request, assert on its payload and answer it through the returned responder.

use crate::framework::{ActorEntity, Filter, ResourceClient, ResourceRequest, Response, TickerCommand};
use tokio::sync::mpsc;

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// Client wrappers such as [`OrderClient`](crate::clients::OrderClient) add
/// behavior on top of the raw channel: payload construction, error mapping,
/// derived views. To test that behavior deterministically we skip the actor and
/// answer its requests by hand.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Returns the next message if it is a Seed request.
pub async fn expect_seed<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Vec<T>, Response<usize>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Seed { items, respond_to }) => Some((items, respond_to)),
        _ => None,
    }
}

/// Returns the next message if it is a Create request.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Returns the next message if it is an Update request.
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Returns the next message if it is a List request.
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Option<Filter<T>>, Response<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Returns the next message if it is a Ticker request.
pub async fn expect_ticker<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(TickerCommand, Response<bool>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Ticker {
            command,
            respond_to,
        }) => Some((command, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::FrameworkError;
    use crate::model::{Catalog, Order, OrderCreate, OrderLine, OrderStatus};

    fn espresso_order() -> OrderCreate {
        let catalog = Catalog::cafe();
        let item = catalog.get("d1").cloned().unwrap();
        OrderCreate {
            customer_name: "Test".into(),
            table_number: Some(2),
            lines: vec![OrderLine::new(item, 1)],
            status: OrderStatus::New,
        }
    }

    #[tokio::test]
    async fn test_mock_client_answers_create() {
        let (client, mut receiver) = create_mock_client::<Order>(10);

        let create_task = tokio::spawn(async move { client.create(espresso_order()).await });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.customer_name, "Test");
        responder.send(Err(FrameworkError::ActorDropped)).unwrap();

        let result = create_task.await.unwrap();
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }

    #[tokio::test]
    async fn test_mock_client_reports_closed_actor() {
        let (client, receiver) = create_mock_client::<Order>(1);
        drop(receiver);

        let result = client.list(None).await;
        assert!(matches!(result, Err(FrameworkError::ActorClosed)));
    }
}
