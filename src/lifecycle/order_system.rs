use crate::clients::{ActorClient, OrderClient};
use crate::config::{ConfigError, SimulationConfig};
use crate::model::Catalog;
use crate::simulation::OrderGenerator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Owner of a running order store.
///
/// `OrderSystem` is responsible for:
/// - **Startup**: spawning the order actor with its generator and transition policy
/// - **Teardown**: stopping the generator and waiting for the actor task to exit
///
/// # Example
///
/// ```ignore
/// let system = OrderSystem::new(&SimulationConfig::default())?;
/// system.order_client.initialize().await?;
///
/// let stats = system.order_client.today_stats().await?;
///
/// system.shutdown().await?;
/// ```
pub struct OrderSystem {
    /// Client for interacting with the Order actor
    pub order_client: OrderClient,

    /// Task handle of the Order actor (used for graceful shutdown)
    handle: JoinHandle<()>,
}

impl OrderSystem {
    /// Spawns a store over the cafe menu.
    ///
    /// The generator RNG is seeded from `config.seed`, or from the OS when no
    /// seed is configured. Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `config` fails [`SimulationConfig::validate`].
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_parts(config, Arc::new(Catalog::cafe()), rng)
    }

    /// Spawns a store over an explicit catalog and RNG, after validating `config`.
    pub fn with_parts<R>(
        config: &SimulationConfig,
        catalog: Arc<Catalog>,
        rng: R,
    ) -> Result<Self, ConfigError>
    where
        R: Rng + Send + 'static,
    {
        config.validate()?;
        let (actor, order_client) =
            crate::order_actor::new(config.channel_capacity, Arc::clone(&catalog));
        let generator = OrderGenerator::new(&catalog, config.generator, rng);
        let actor = actor.with_producer(generator, config.tick_interval, config.enabled);

        // Order actor needs the transition policy (Context = TransitionPolicy)
        let handle = tokio::spawn(actor.run(config.policy));
        info!(
            policy = %config.policy,
            tick_ms = config.tick_interval.as_millis() as u64,
            enabled = config.enabled,
            "Order system started"
        );

        Ok(Self {
            order_client,
            handle,
        })
    }

    /// Stops the generator, closes the store and waits for the actor task.
    ///
    /// Other clones of the client observe
    /// [`ActorCommunicationError`](crate::order_actor::OrderError::ActorCommunicationError)
    /// afterwards.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the actor shut down cleanly
    /// - `Err(String)` if the actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // An actor that already exited has nothing left to stop
        if let Err(e) = self.order_client.inner().shutdown().await {
            info!(error = %e, "Actor already stopped");
        }
        drop(self.order_client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
