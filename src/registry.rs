use std::collections::HashMap;

use crate::{
    error::PropertiesError,
    types::{GetterTable, PropertyGetter, PropertySetter, SetterTable},
};

/// Source of property accessors for one bus interface.
///
/// The two MPRIS interface objects implement this in the embedding
/// application; the registry consumes the tables once, at construction.
pub trait PropertyProvider {
    /// Getter table, keyed by property name.
    fn getters(&self) -> GetterTable;

    /// Setter table for writable properties.
    ///
    /// Read-only properties must be absent; that absence is what rejects
    /// writes to them.
    fn setters(&self) -> SetterTable;
}

/// Name-keyed accessor tables for every interface the service exposes.
///
/// Two parallel maps, populated once and never structurally mutated
/// afterwards. Only the state behind the registered closures changes over
/// the service's life. Duplicate or malformed names are a construction-time
/// programming error and are not validated here.
#[derive(Default)]
pub struct InterfaceRegistry {
    getters: HashMap<String, GetterTable>,
    setters: HashMap<String, SetterTable>,
}

impl InterfaceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `provider`'s accessor tables under `interface`.
    ///
    /// Every registered interface gets an entry in both maps, even when its
    /// setter table is empty, so writes against it fail on the property
    /// lookup rather than the interface lookup.
    pub fn register(&mut self, interface: impl Into<String>, provider: &dyn PropertyProvider) {
        let interface = interface.into();
        self.getters.insert(interface.clone(), provider.getters());
        self.setters.insert(interface, provider.setters());
    }

    pub(crate) fn getter(
        &self,
        interface: &str,
        property: &str,
    ) -> Result<&PropertyGetter, PropertiesError> {
        self.interface_getters(interface)?
            .get(property)
            .ok_or_else(|| PropertiesError::PropertyNotFound(property.to_string()))
    }

    pub(crate) fn interface_getters(&self, interface: &str) -> Result<&GetterTable, PropertiesError> {
        self.getters
            .get(interface)
            .ok_or_else(|| PropertiesError::InterfaceNotFound(interface.to_string()))
    }

    pub(crate) fn setter(
        &self,
        interface: &str,
        property: &str,
    ) -> Result<&PropertySetter, PropertiesError> {
        self.setters
            .get(interface)
            .ok_or_else(|| PropertiesError::InterfaceNotFound(interface.to_string()))?
            .get(property)
            .ok_or_else(|| PropertiesError::PropertyNotFound(property.to_string()))
    }
}
