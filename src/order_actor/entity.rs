//! [`ActorEntity`] implementation for [`Order`].
//!
//! The store calls [`ActorEntity::from_create_params`] for both `add_order`
//! and generated orders, so validation and the total snapshot live in one
//! place ([`Order::new`]). Updates only ever touch the status.

use crate::framework::ActorEntity;
use crate::model::{Order, OrderCreate, OrderId, OrderUpdate};
use crate::order_actor::{OrderError, TransitionPolicy};
use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Context = TransitionPolicy;
    type Error = OrderError;

    fn id(&self) -> &OrderId {
        &self.id
    }

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        Order::new(id, params, Utc::now())
    }

    async fn on_update(
        &mut self,
        update: OrderUpdate,
        policy: &TransitionPolicy,
    ) -> Result<(), OrderError> {
        let target = match update {
            OrderUpdate::SetStatus(status) => status,
            OrderUpdate::Advance => match self.status.next() {
                Some(next) => next,
                None => {
                    debug!(order_id = %self.id, "Advance ignored, order completed");
                    return Ok(());
                }
            },
        };
        policy.check(self.status, target)?;
        self.status = target;
        Ok(())
    }
}
