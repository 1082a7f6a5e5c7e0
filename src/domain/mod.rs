//! Domain layer: entities, value objects and the ports they are reached through.

pub mod invoice;
pub mod money;
pub mod payment;
pub mod ports;
pub mod purchase_order;
pub mod supplier;
