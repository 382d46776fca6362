//! Properties sub-protocol for MPRIS media-player services.
//!
//! Implements the `org.freedesktop.DBus.Properties` surface a media-player
//! service exposes on the session bus: property reads (`Get`, `GetAll`),
//! property writes (`Set`) and the `PropertiesChanged` signal announcing
//! every successful write. The dispatcher is built once from the two MPRIS
//! interface objects (root and player), each contributing a name-keyed table
//! of getter and setter closures.
//!
//! Bus bootstrapping, name registration and object export stay with the
//! embedding application; this crate consumes a ready [`zbus::Connection`]
//! (or any [`SignalEmitter`]) and two ready [`PropertyProvider`]s.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mpris_properties::{GetterTable, PropertyProvider, SetterTable};
//! use zbus::zvariant::Value;
//!
//! struct Root;
//!
//! impl PropertyProvider for Root {
//!     fn getters(&self) -> GetterTable {
//!         let mut table = GetterTable::new();
//!         table.insert(
//!             "Identity".to_string(),
//!             Box::new(|| Ok(Value::from("Example Player").try_to_owned()?)),
//!         );
//!         table
//!     }
//!
//!     fn setters(&self) -> SetterTable {
//!         SetterTable::new()
//!     }
//! }
//! ```

/// Property dispatch across the registered interfaces.
pub mod dispatcher;

/// Error types for the properties protocol surface.
pub mod error;

/// Change-notification signal emission.
pub mod notifier;

/// Interface and property accessor tables.
pub mod registry;

/// Shared type aliases and protocol constants.
pub mod types;

pub use dispatcher::PropertiesDispatcher;
pub use error::{PropertiesError, PropertyError, Result};
pub use notifier::{ChangeNotifier, SignalEmitter};
pub use registry::{InterfaceRegistry, PropertyProvider};
pub use types::{GetterTable, PropertyGetter, PropertySetter, SetterTable};
