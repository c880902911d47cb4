//! Gamma event API: payload types, event resolution, market filtering

pub mod events;
pub mod markets;
pub mod resolver;
