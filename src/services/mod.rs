/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health;
/// Tournament roster mutations and journey generation.
pub mod membership;
/// Owner-scoped team management.
pub mod teams;
/// Tournament management, including the admin overrides.
pub mod tournaments;
/// Accounts: registration, login and maintenance.
pub mod users;
