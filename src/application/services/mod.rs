//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (OntapApi) but are themselves
//! concrete structs, not traits.

mod provision;

pub use provision::ProvisioningService;
