use std::collections::HashMap;

use zbus::zvariant::OwnedValue;

use crate::error::PropertyError;

/// Well-known object path every MPRIS player exports its interfaces at.
pub const MPRIS_OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";

/// Root MPRIS interface.
pub const ROOT_INTERFACE: &str = "org.mpris.MediaPlayer2";

/// Playback-control MPRIS interface.
pub const PLAYER_INTERFACE: &str = "org.mpris.MediaPlayer2.Player";

/// Interface the change-notification signal belongs to.
pub const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";

/// Member name of the change-notification signal.
pub const PROPERTIES_CHANGED: &str = "PropertiesChanged";

/// Prefix under which MPRIS services claim their bus name.
pub const BUS_NAME_PREFIX: &str = "org.mpris.MediaPlayer2.";

/// Zero-argument property accessor.
///
/// Returns the property's current value as the wire variant envelope, or the
/// failure the underlying implementation signalled.
pub type PropertyGetter = Box<dyn Fn() -> std::result::Result<OwnedValue, PropertyError> + Send + Sync>;

/// One-argument property mutator.
///
/// Receives the unwrapped variant payload. Read-only properties have no
/// setter at all.
pub type PropertySetter = Box<dyn Fn(OwnedValue) -> std::result::Result<(), PropertyError> + Send + Sync>;

/// Getter table for one interface, keyed by property name.
pub type GetterTable = HashMap<String, PropertyGetter>;

/// Setter table for one interface, keyed by property name.
///
/// Absence of a property here is what marks it read-only.
pub type SetterTable = HashMap<String, PropertySetter>;
