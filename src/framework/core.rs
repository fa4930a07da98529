//! # Core Actor Framework
//!
//! This module defines the generic building blocks for the store actor.
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: The trait that every stored resource implements.
//! - [`Producer`]: A source of synthetic create payloads, polled on every tick.
//! - [`ResourceActor`]: The generic actor that owns an ordered collection of entities.
//! - [`ResourceClient`]: The generic client for communicating with the actor.
//! - [`FrameworkError`]: Common errors (e.g., ActorClosed, AlreadySeeded).

use async_trait::async_trait;
use std::collections::VecDeque;
use std::fmt::{Debug, Display};
use std::ops::ControlFlow;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION (Entity trait with hooks, and the tick producer)
// =============================================================================

/// Trait that any resource entity must implement to be managed by [`ResourceActor`].
///
/// # Architecture Note
/// The actor only knows how to store, order and look up entities. Everything
/// domain-specific (validation, derived fields, transition rules) lives in the
/// hooks below, so the message loop is written once.
///
/// # Async & Context
/// Hooks are `#[async_trait]` and receive a `Context` injected through
/// [`ResourceActor::run`]. The context is bound late, when the actor starts, rather
/// than at construction.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    type Id: Eq + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// The runtime context injected into every hook. Use `()` if nothing is needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// Errors travel back to the caller boxed inside [`FrameworkError::EntityError`]
    /// and can be downcast to this type again on the client side.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the identifier of this entity.
    fn id(&self) -> &Self::Id;

    /// Construct the full entity from a freshly generated ID and the create payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is built and before it is inserted.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request targets this entity.
    ///
    /// Implementations must validate before mutating: on error the entity stays
    /// in the store as it is.
    async fn on_update(&mut self, update: Self::Update, ctx: &Self::Context)
        -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// A background source of new entities.
///
/// The actor calls [`Producer::produce`] once per tick while the ticker is armed.
/// Returning `None` skips the tick.
pub trait Producer<T: ActorEntity>: Send {
    fn produce(&mut self) -> Option<T::Create>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Store already seeded")]
    AlreadySeeded,
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Predicate used by [`ResourceRequest::List`] to select entities.
pub type Filter<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Control commands for the background ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerCommand {
    /// Arm the ticker. No-op when already armed.
    Start,
    /// Disarm the ticker. No-op when already disarmed.
    Stop,
    /// Flip between armed and disarmed.
    Toggle,
    /// Report the current state without changing it.
    Status,
}

/// Internal message type sent to the actor to request operations.
///
/// Besides the CRUD lifecycle (`Create`, `Get`, `Update`, `Delete`) the actor
/// answers collection-level reads (`List`), accepts a one-time fixture (`Seed`),
/// controls its ticker (`Ticker`) and stops on request (`Shutdown`).
///
/// Lookups by ID never fail: a missing ID yields `None`/`false` so that callers
/// holding stale IDs are not punished for a concurrent delete.
pub enum ResourceRequest<T: ActorEntity> {
    Seed {
        items: Vec<T>,
        respond_to: Response<usize>,
    },
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<Option<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<bool>,
    },
    List {
        filter: Option<Filter<T>>,
        respond_to: Response<Vec<T>>,
    },
    Ticker {
        command: TickerCommand,
        respond_to: Response<bool>,
    },
    Shutdown {
        respond_to: Response<()>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// The generic actor that owns an ordered collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the collection, the
/// receiver end of the channel and the ticker. Requests and ticks are handled one
/// at a time inside a single task, so a reader never observes a half-applied
/// mutation and no lock guards the collection.
///
/// The collection is kept newest-first: created and produced entities are
/// prepended, seeded entities are appended in the order given.
///
/// # Ticker
/// When a [`Producer`] is attached, the actor keeps an `Option<Interval>`. Arming
/// creates an interval whose first tick is one full period away; disarming drops
/// it. Both happen inside the request handler, and requests are polled before
/// ticks, so once a `Stop` has been answered no further tick can run.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: VecDeque<T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
    producer: Option<Box<dyn Producer<T>>>,
    tick_period: Duration,
    arm_on_start: bool,
    ticker: Option<Interval>,
    seeded: bool,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel.
    /// * `next_id_fn` - Generator for the IDs of created entities.
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: VecDeque::new(),
            next_id_fn: Box::new(next_id_fn),
            producer: None,
            tick_period: Duration::from_secs(10),
            arm_on_start: false,
            ticker: None,
            seeded: false,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Attaches a background producer polled every `tick_period`.
    ///
    /// The ticker is armed when [`run`](Self::run) starts if `enabled` is true.
    pub fn with_producer(
        mut self,
        producer: impl Producer<T> + 'static,
        tick_period: Duration,
        enabled: bool,
    ) -> Self {
        self.producer = Some(Box::new(producer));
        self.tick_period = tick_period;
        self.arm_on_start = enabled;
        self
    }

    /// Runs the actor's event loop until a `Shutdown` request arrives or every
    /// client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        // "Order" instead of "cafe_order_sim::model::order::Order"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");

        if self.arm_on_start {
            self.arm(entity_type);
        }
        info!(entity_type, ticking = self.ticker.is_some(), "Actor started");

        loop {
            tokio::select! {
                biased;
                msg = self.receiver.recv() => {
                    let Some(msg) = msg else { break };
                    if self.handle(msg, &context, entity_type).await.is_break() {
                        break;
                    }
                }
                _ = next_tick(&mut self.ticker) => {
                    self.on_tick(&context, entity_type).await;
                }
            }
        }

        self.ticker = None;
        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn handle(
        &mut self,
        msg: ResourceRequest<T>,
        context: &T::Context,
        entity_type: &'static str,
    ) -> ControlFlow<()> {
        match msg {
            ResourceRequest::Seed { items, respond_to } => {
                if self.seeded {
                    warn!(entity_type, "Seed rejected, store already seeded");
                    let _ = respond_to.send(Err(FrameworkError::AlreadySeeded));
                    return ControlFlow::Continue(());
                }
                self.seeded = true;
                let count = items.len();
                self.store.extend(items);
                info!(entity_type, count, size = self.store.len(), "Seeded");
                let _ = respond_to.send(Ok(count));
            }
            ResourceRequest::Create { params, respond_to } => {
                debug!(entity_type, ?params, "Create");
                let _ = respond_to.send(self.create(params, context, entity_type).await);
            }
            ResourceRequest::Get { id, respond_to } => {
                let item = self.store.iter().find(|item| item.id() == &id).cloned();
                debug!(entity_type, %id, found = item.is_some(), "Get");
                let _ = respond_to.send(Ok(item));
            }
            ResourceRequest::Update {
                id,
                update,
                respond_to,
            } => {
                debug!(entity_type, %id, ?update, "Update");
                let Some(item) = self.store.iter_mut().find(|item| item.id() == &id) else {
                    debug!(entity_type, %id, "Update ignored, not found");
                    let _ = respond_to.send(Ok(None));
                    return ControlFlow::Continue(());
                };
                match item.on_update(update, context).await {
                    Ok(()) => {
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(Some(item.clone())));
                    }
                    Err(e) => {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                    }
                }
            }
            ResourceRequest::Delete { id, respond_to } => {
                let Some(position) = self.store.iter().position(|item| item.id() == &id) else {
                    debug!(entity_type, %id, "Delete ignored, not found");
                    let _ = respond_to.send(Ok(false));
                    return ControlFlow::Continue(());
                };
                if let Err(e) = self.store[position].on_delete(context).await {
                    warn!(entity_type, %id, error = %e, "on_delete failed");
                    let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                    return ControlFlow::Continue(());
                }
                self.store.remove(position);
                info!(entity_type, %id, size = self.store.len(), "Deleted");
                let _ = respond_to.send(Ok(true));
            }
            ResourceRequest::List { filter, respond_to } => {
                let items: Vec<T> = match filter {
                    Some(filter) => self.store.iter().filter(|item| filter(item)).cloned().collect(),
                    None => self.store.iter().cloned().collect(),
                };
                debug!(entity_type, matched = items.len(), size = self.store.len(), "List");
                let _ = respond_to.send(Ok(items));
            }
            ResourceRequest::Ticker {
                command,
                respond_to,
            } => {
                match command {
                    TickerCommand::Start => self.arm(entity_type),
                    TickerCommand::Stop => self.disarm(entity_type),
                    TickerCommand::Toggle if self.ticker.is_some() => self.disarm(entity_type),
                    TickerCommand::Toggle => self.arm(entity_type),
                    TickerCommand::Status => {}
                }
                let _ = respond_to.send(Ok(self.ticker.is_some()));
            }
            ResourceRequest::Shutdown { respond_to } => {
                self.disarm(entity_type);
                let _ = respond_to.send(Ok(()));
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    async fn create(
        &mut self,
        params: T::Create,
        context: &T::Context,
        entity_type: &'static str,
    ) -> Result<T, FrameworkError> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create_params(id.clone(), params).map_err(|e| {
            warn!(entity_type, error = %e, "Create failed");
            FrameworkError::EntityError(Box::new(e))
        })?;
        if let Err(e) = item.on_create(context).await {
            warn!(entity_type, error = %e, "on_create failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }
        self.store.push_front(item.clone());
        info!(entity_type, %id, size = self.store.len(), "Created");
        Ok(item)
    }

    async fn on_tick(&mut self, context: &T::Context, entity_type: &'static str) {
        let Some(producer) = self.producer.as_mut() else {
            return;
        };
        match producer.produce() {
            Some(params) => {
                debug!(entity_type, ?params, "Tick produced");
                // Failures are already logged by `create`
                let _ = self.create(params, context, entity_type).await;
            }
            None => debug!(entity_type, "Tick skipped"),
        }
    }

    fn arm(&mut self, entity_type: &'static str) {
        if self.ticker.is_some() || self.producer.is_none() {
            return;
        }
        if self.tick_period.is_zero() {
            warn!(entity_type, "Ticker not armed, tick period is zero");
            return;
        }
        let mut interval = time::interval_at(Instant::now() + self.tick_period, self.tick_period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.ticker = Some(interval);
        info!(entity_type, period_ms = self.tick_period.as_millis() as u64, "Ticker armed");
    }

    fn disarm(&mut self, entity_type: &'static str) {
        if self.ticker.take().is_some() {
            info!(entity_type, "Ticker disarmed");
        }
    }
}

/// Resolves on the next tick, or never when the ticker is disarmed.
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe, cloneable client for interacting with a `ResourceActor`.
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn seed(&self, items: Vec<T>) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Seed { items, respond_to })
            .await
    }

    pub async fn create(&self, params: T::Create) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<bool, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn list(&self, filter: Option<Filter<T>>) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { filter, respond_to })
            .await
    }

    pub async fn ticker(&self, command: TickerCommand) -> Result<bool, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Ticker {
            command,
            respond_to,
        })
        .await
    }

    pub async fn shutdown(&self) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Shutdown { respond_to })
            .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Debug, PartialEq)]
    struct Ticket {
        id: String,
        title: String,
        closed: bool,
    }

    #[derive(Debug)]
    struct TicketCreate {
        title: String,
    }

    #[derive(Debug)]
    enum TicketUpdate {
        Close,
        Reopen,
    }

    #[derive(Debug, thiserror::Error)]
    enum TicketError {
        #[error("title must not be empty")]
        EmptyTitle,
        #[error("ticket {0} is already closed")]
        AlreadyClosed(String),
    }

    #[async_trait]
    impl ActorEntity for Ticket {
        type Id = String;
        type Create = TicketCreate;
        type Update = TicketUpdate;
        type Context = ();
        type Error = TicketError;

        fn id(&self) -> &String {
            &self.id
        }

        fn from_create_params(id: String, params: TicketCreate) -> Result<Self, TicketError> {
            if params.title.is_empty() {
                return Err(TicketError::EmptyTitle);
            }
            Ok(Self {
                id,
                title: params.title,
                closed: false,
            })
        }

        async fn on_update(&mut self, update: TicketUpdate, _ctx: &()) -> Result<(), TicketError> {
            match update {
                TicketUpdate::Close if self.closed => Err(TicketError::AlreadyClosed(self.id.clone())),
                TicketUpdate::Close => {
                    self.closed = true;
                    Ok(())
                }
                TicketUpdate::Reopen => {
                    self.closed = false;
                    Ok(())
                }
            }
        }
    }

    struct EveryTick;

    impl Producer<Ticket> for EveryTick {
        fn produce(&mut self) -> Option<TicketCreate> {
            Some(TicketCreate {
                title: "generated".into(),
            })
        }
    }

    fn ticket_ids() -> impl Fn() -> String + Send + Sync + 'static {
        let counter = Arc::new(AtomicU64::new(1));
        move || format!("ticket_{}", counter.fetch_add(1, Ordering::SeqCst))
    }

    fn spawn_actor() -> ResourceClient<Ticket> {
        let (actor, client) = ResourceActor::new(10, ticket_ids());
        tokio::spawn(actor.run(()));
        client
    }

    #[tokio::test]
    async fn test_create_prepends_and_lists_newest_first() {
        let client = spawn_actor();

        let first = client.create(TicketCreate { title: "a".into() }).await.unwrap();
        let second = client.create(TicketCreate { title: "b".into() }).await.unwrap();

        let all = client.list(None).await.unwrap();
        assert_eq!(all, vec![second, first]);
    }

    #[tokio::test]
    async fn test_create_rejection_keeps_entity_error() {
        let client = spawn_actor();

        let err = client.create(TicketCreate { title: String::new() }).await.unwrap_err();
        match err {
            FrameworkError::EntityError(inner) => {
                assert!(matches!(inner.downcast_ref::<TicketError>(), Some(TicketError::EmptyTitle)));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(client.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stale_ids_are_no_ops() {
        let client = spawn_actor();
        let ticket = client.create(TicketCreate { title: "a".into() }).await.unwrap();

        let updated = client.update("ticket_99".into(), TicketUpdate::Close).await.unwrap();
        assert!(updated.is_none());
        assert!(!client.delete("ticket_99".into()).await.unwrap());

        assert!(client.delete(ticket.id.clone()).await.unwrap());
        assert!(!client.delete(ticket.id.clone()).await.unwrap());
        assert!(client.get(ticket.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_update_leaves_entity_untouched() {
        let client = spawn_actor();
        let ticket = client.create(TicketCreate { title: "a".into() }).await.unwrap();

        client.update(ticket.id.clone(), TicketUpdate::Close).await.unwrap();
        assert!(client.update(ticket.id.clone(), TicketUpdate::Close).await.is_err());

        let stored = client.get(ticket.id.clone()).await.unwrap().unwrap();
        assert!(stored.closed);

        let reopened = client.update(ticket.id, TicketUpdate::Reopen).await.unwrap().unwrap();
        assert!(!reopened.closed);
    }

    #[tokio::test]
    async fn test_seed_is_accepted_once() {
        let client = spawn_actor();
        let fixture = vec![Ticket {
            id: "fixture_1".into(),
            title: "seeded".into(),
            closed: true,
        }];

        assert_eq!(client.seed(fixture.clone()).await.unwrap(), 1);
        assert!(matches!(client.seed(fixture).await, Err(FrameworkError::AlreadySeeded)));

        let closed = client
            .list(Some(Box::new(|ticket: &Ticket| ticket.closed)))
            .await
            .unwrap();
        assert_eq!(closed.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_produces_only_while_armed() {
        let period = Duration::from_secs(10);
        let (actor, client) = ResourceActor::new(10, ticket_ids());
        let handle = tokio::spawn(actor.with_producer(EveryTick, period, true).run(()));

        time::sleep(period * 2 + Duration::from_millis(500)).await;
        assert_eq!(client.list(None).await.unwrap().len(), 2);

        assert!(!client.ticker(TickerCommand::Stop).await.unwrap());
        assert!(!client.ticker(TickerCommand::Stop).await.unwrap());
        time::sleep(period * 5).await;
        assert_eq!(client.list(None).await.unwrap().len(), 2);

        assert!(client.ticker(TickerCommand::Toggle).await.unwrap());
        time::sleep(period + Duration::from_millis(500)).await;
        assert_eq!(client.list(None).await.unwrap().len(), 3);

        client.shutdown().await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_zero_tick_period_stays_disarmed() {
        let (actor, client) = ResourceActor::new(10, ticket_ids());
        let handle = tokio::spawn(actor.with_producer(EveryTick, Duration::ZERO, true).run(()));

        assert!(!client.ticker(TickerCommand::Status).await.unwrap());
        assert!(!client.ticker(TickerCommand::Toggle).await.unwrap());
        assert!(client.list(None).await.unwrap().is_empty());

        client.shutdown().await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_ticker_without_producer_stays_disarmed() {
        let client = spawn_actor();
        assert!(!client.ticker(TickerCommand::Start).await.unwrap());
        assert!(!client.ticker(TickerCommand::Status).await.unwrap());
    }
}
