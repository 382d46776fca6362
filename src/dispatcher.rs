use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use tracing::{debug, instrument};
use zbus::{Connection, zvariant::OwnedValue};

use crate::{
    error::{PropertiesError, Result},
    notifier::{ChangeNotifier, SignalEmitter},
    registry::{InterfaceRegistry, PropertyProvider},
    types::{BUS_NAME_PREFIX, PLAYER_INTERFACE, ROOT_INTERFACE},
};

/// The public surface of the properties sub-protocol.
///
/// Maps (interface, property) pairs to the getter and setter closures
/// registered at construction, translates their outcomes into protocol
/// errors and announces every successful write on the bus.
///
/// Reads share the lock and run concurrently; a write holds it exclusively
/// for the whole lookup, mutation and notification sequence, so no reader
/// can observe a half-applied write and the emitted signal always reflects
/// a fully applied one.
pub struct PropertiesDispatcher {
    registry: RwLock<InterfaceRegistry>,
    notifier: ChangeNotifier,
}

impl PropertiesDispatcher {
    /// Build the dispatcher for one MPRIS service instance.
    ///
    /// Registers `root` under `org.mpris.MediaPlayer2` and `player` under
    /// `org.mpris.MediaPlayer2.Player`, exactly as each reports its tables,
    /// and namespaces `service_name` under the MPRIS bus-name prefix to form
    /// the signal sender identity.
    pub fn new(
        service_name: &str,
        connection: &Connection,
        root: &dyn PropertyProvider,
        player: &dyn PropertyProvider,
    ) -> Self {
        let mut registry = InterfaceRegistry::new();
        registry.register(ROOT_INTERFACE, root);
        registry.register(PLAYER_INTERFACE, player);

        Self::with_registry(
            format!("{BUS_NAME_PREFIX}{service_name}"),
            Arc::new(connection.clone()),
            registry,
        )
    }

    /// Build a dispatcher over an explicit registry and signal transport.
    pub fn with_registry(
        service_identity: String,
        emitter: Arc<dyn SignalEmitter>,
        registry: InterfaceRegistry,
    ) -> Self {
        debug!(identity = %service_identity, "properties dispatcher ready");

        Self {
            registry: RwLock::new(registry),
            notifier: ChangeNotifier::new(service_identity, emitter),
        }
    }

    /// Read one property.
    ///
    /// # Errors
    ///
    /// [`PropertiesError::InterfaceNotFound`] or
    /// [`PropertiesError::PropertyNotFound`] when the pair is not
    /// registered, [`PropertiesError::OperationFailed`] when the getter
    /// itself fails.
    pub async fn get(&self, interface: &str, property: &str) -> Result<OwnedValue> {
        let registry = self.registry.read().await;

        let getter = registry.getter(interface, property)?;
        getter().map_err(PropertiesError::operation_failed)
    }

    /// Read every property of `interface` into one map.
    ///
    /// The snapshot is atomic with respect to writers: the shared guard is
    /// held for the whole batch. Invocation order across properties is
    /// unspecified.
    ///
    /// # Errors
    ///
    /// [`PropertiesError::InterfaceNotFound`] when the interface is not
    /// registered. Any single getter failing aborts the whole call with
    /// [`PropertiesError::OperationFailed`]; partial results are never
    /// returned.
    pub async fn get_all(&self, interface: &str) -> Result<HashMap<String, OwnedValue>> {
        let registry = self.registry.read().await;

        let getters = registry.interface_getters(interface)?;
        let mut values = HashMap::with_capacity(getters.len());
        for (property, getter) in getters {
            let value = getter().map_err(PropertiesError::operation_failed)?;
            values.insert(property.clone(), value);
        }

        Ok(values)
    }

    /// Write one property and announce the change.
    ///
    /// Holds the exclusive guard across lookup, setter invocation and signal
    /// emission; no other read or write proceeds until the sequence
    /// completes.
    ///
    /// # Errors
    ///
    /// [`PropertiesError::InterfaceNotFound`] or
    /// [`PropertiesError::PropertyNotFound`] when the pair is not in the
    /// setter tables; the latter is also how writes to read-only properties
    /// are rejected. [`PropertiesError::OperationFailed`] when the setter
    /// fails (no signal is emitted) or when emission fails. In the emission
    /// case the value has already been applied and the caller cannot tell
    /// the two apart from the error alone.
    #[instrument(skip(self, value))]
    pub async fn set(&self, interface: &str, property: &str, value: OwnedValue) -> Result<()> {
        let registry = self.registry.write().await;

        let setter = registry.setter(interface, property)?;

        // Variants can carry file descriptors, so the clone handed to the
        // setter is fallible.
        let applied = value
            .try_clone()
            .map_err(PropertiesError::operation_failed)?;
        setter(applied).map_err(PropertiesError::operation_failed)?;

        self.notifier
            .properties_changed(property, value)
            .await
            .map_err(PropertiesError::operation_failed)
    }
}
