//! Domain layer: context, decorators, driver, configuration and errors.

pub mod config;
pub mod context;
pub mod decorators;
pub mod errors;
pub mod gas_price;
pub mod handler;

#[cfg(test)]
pub(crate) mod test_helpers;
