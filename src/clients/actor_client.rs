use crate::framework::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the by-id operations.
///
/// Lookups and deletes behave the same for every entity: a missing id is
/// `None`/`false`, never an error.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<FrameworkError> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::Error::from)
    }

    /// Delete an entity by ID. Returns whether anything was removed.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<bool, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::Error::from)
    }
}
