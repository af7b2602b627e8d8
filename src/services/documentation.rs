use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Courtside.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::tournaments::create_tournament,
        crate::routes::tournaments::list_tournaments,
        crate::routes::tournaments::get_tournament,
        crate::routes::tournaments::delete_tournament,
        crate::routes::tournaments::enroll_participant,
        crate::routes::tournaments::list_participants,
        crate::routes::tournaments::withdraw_participant,
        crate::routes::tournaments::initialize_bracket,
        crate::routes::tournaments::set_status,
        crate::routes::matches::list_matches,
        crate::routes::matches::record_result,
        crate::routes::matches::schedule_match,
        crate::routes::standings::standings,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::tournament::CreateTournamentRequest,
            crate::dto::tournament::EnrollParticipantRequest,
            crate::dto::tournament::SetStatusRequest,
            crate::dto::tournament::TournamentSummary,
            crate::dto::tournament::ParticipantSummary,
            crate::dto::matches::RecordResultRequest,
            crate::dto::matches::ScheduleMatchRequest,
            crate::dto::matches::MatchSummary,
            crate::dto::standings::StandingRow,
            crate::engine::model::Format,
            crate::engine::model::TournamentStatus,
            crate::engine::model::MatchStatus,
        )
    ),
    tags(
        (name = "tournaments", description = "Tournament lifecycle and enrollment"),
        (name = "matches", description = "Match results and scheduling"),
        (name = "standings", description = "Ranked standings tables"),
        (name = "health", description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
