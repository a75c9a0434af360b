//! Order aggregate and snapshot types
//!
//! - Aggregate: the fully-hydrated order handed over by the order service
//! - Snapshot: denormalized, JSON-safe copy of an aggregate at one instant
//! - Customization: pizza half/flavor/ingredient formatting shared by both

pub mod aggregate;
pub mod customization;
pub mod snapshot;
pub mod types;

// Re-exports
pub use aggregate::{
    DeliveryInfo, ItemModifier, ModifierRef, OrderAggregate, OrderItemAggregate,
    PizzaCustomizationRef, PizzaCustomizationSelection, ProductRef, VariantRef,
};
pub use customization::{PizzaSelection, format_pizza_customizations};
pub use snapshot::{DeliveryInfoSnapshot, ItemSnapshot, OrderSnapshot, SNAPSHOT_VERSION};
pub use types::*;
