/// Immutable records of balance-affecting events.
pub mod transaction;

/// Account balance management for the savings and checking variants.
/// Operations are validated into events first, then applied.
pub mod account;

/// Validation of the raw inputs used to open an account.
pub mod command;

/// Ordered collection of accounts with unique account numbers.
pub mod registry;

/// Bank interface, plus "in memory" implementation.
/// Coordinates command parsing, account lookup and account operations.
pub mod bank;

/// Console front end. Ideally this module lives in its own crate, it is
/// kept here so integration tests can drive it.
pub mod bin_utils;
