//! Data models: database entities, transfer representations, and the
//! explicit mapping functions between them.

/// Account entity and DTO (accounts service)
pub mod account;
/// Audit columns shared by every table
pub mod audit;
/// Card entity and DTO (cards service)
pub mod card;
/// Customer entity and DTO (accounts service)
pub mod customer;
/// `*-info` endpoint payload
pub mod info;
/// Loan entity and DTO (loans service)
pub mod loan;
/// Status payloads returned by the accounts service
pub mod status;
