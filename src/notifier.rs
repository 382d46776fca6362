use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tracing::debug;
use zbus::{Connection, names::BusName, zvariant::OwnedValue};

use crate::types::{MPRIS_OBJECT_PATH, PROPERTIES_CHANGED, PROPERTIES_INTERFACE};

/// Outbound transport for change-notification signals.
///
/// Implemented by [`zbus::Connection`]. The dispatcher only needs this one
/// emit primitive from the connection handle it is given.
#[async_trait]
pub trait SignalEmitter: Send + Sync {
    /// Emit one `PropertiesChanged` signal to the bus.
    ///
    /// `sender` is the interface-qualified service identity carried as the
    /// first signal argument.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the signal could not be sent.
    async fn emit_properties_changed(
        &self,
        sender: &str,
        changed: HashMap<String, OwnedValue>,
        invalidated: Vec<String>,
    ) -> zbus::Result<()>;
}

#[async_trait]
impl SignalEmitter for Connection {
    async fn emit_properties_changed(
        &self,
        sender: &str,
        changed: HashMap<String, OwnedValue>,
        invalidated: Vec<String>,
    ) -> zbus::Result<()> {
        self.emit_signal(
            None::<BusName<'_>>,
            MPRIS_OBJECT_PATH,
            PROPERTIES_INTERFACE,
            PROPERTIES_CHANGED,
            &(sender, changed, invalidated),
        )
        .await
    }
}

/// Emits the change-notification signal for the combined service.
pub struct ChangeNotifier {
    service_identity: String,
    emitter: Arc<dyn SignalEmitter>,
}

impl ChangeNotifier {
    /// Create a notifier sending as `service_identity` through `emitter`.
    pub fn new(service_identity: String, emitter: Arc<dyn SignalEmitter>) -> Self {
        Self {
            service_identity,
            emitter,
        }
    }

    /// Announce that `property` changed to `value`.
    ///
    /// The signal is addressed to the fixed MPRIS object path and carries a
    /// single-entry changed map and an empty invalidated list; invalidation
    /// is never used here. Emission is attempted once, never retried.
    ///
    /// # Errors
    ///
    /// Returns the transport error if emission fails.
    pub async fn properties_changed(&self, property: &str, value: OwnedValue) -> zbus::Result<()> {
        debug!(property, "emitting PropertiesChanged");

        let changed = HashMap::from([(property.to_string(), value)]);
        self.emitter
            .emit_properties_changed(&self.service_identity, changed, Vec::new())
            .await
    }
}
