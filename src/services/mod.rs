/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Match result recording and scheduling logic.
pub mod match_service;
/// Standings projection and ranking.
pub mod standings_service;
/// Tournament lifecycle and enrollment management.
pub mod tournament_service;
