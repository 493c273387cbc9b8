use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the tournament backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::users::register,
        crate::routes::users::login,
        crate::routes::users::get_user,
        crate::routes::users::update_user,
        crate::routes::users::delete_user,
        crate::routes::teams::create_team,
        crate::routes::teams::list_teams,
        crate::routes::teams::get_team,
        crate::routes::teams::update_team,
        crate::routes::teams::delete_team,
        crate::routes::tournaments::create_tournament,
        crate::routes::tournaments::list_tournaments,
        crate::routes::tournaments::get_tournament,
        crate::routes::tournaments::update_tournament,
        crate::routes::tournaments::delete_tournament,
        crate::routes::tournaments::add_team,
        crate::routes::tournaments::remove_team,
        crate::routes::admin::admin_list_users,
        crate::routes::admin::admin_create_user,
        crate::routes::admin::admin_search_user,
        crate::routes::admin::admin_update_user,
        crate::routes::admin::admin_delete_user,
        crate::routes::admin::admin_list_tournaments,
        crate::routes::admin::admin_get_tournament,
        crate::routes::admin::admin_update_tournament,
        crate::routes::admin::admin_delete_tournament,
    ),
    components(
        schemas(
            crate::dao::models::Role,
            crate::dto::health::HealthStatus,
            crate::dto::health::HealthResponse,
            crate::dto::user::RegisterRequest,
            crate::dto::user::LoginRequest,
            crate::dto::user::LoginResponse,
            crate::dto::user::UpdateUserRequest,
            crate::dto::user::AdminCreateUserRequest,
            crate::dto::user::SearchUserRequest,
            crate::dto::user::UserSummary,
            crate::dto::user::UserResponse,
            crate::dto::user::UsersResponse,
            crate::dto::team::CreateTeamRequest,
            crate::dto::team::UpdateTeamRequest,
            crate::dto::team::TeamSummary,
            crate::dto::team::TeamResponse,
            crate::dto::team::TeamsResponse,
            crate::dto::tournament::CreateTournamentRequest,
            crate::dto::tournament::UpdateTournamentRequest,
            crate::dto::tournament::AdminUpdateTournamentRequest,
            crate::dto::tournament::MembershipRequest,
            crate::dto::tournament::MembershipSummary,
            crate::dto::tournament::ResolvedMembership,
            crate::dto::tournament::TournamentSummary,
            crate::dto::tournament::TournamentDetail,
            crate::dto::tournament::TournamentResponse,
            crate::dto::tournament::TournamentsResponse,
            crate::dto::tournament::TournamentDetailResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "user", description = "Registration, login and account maintenance"),
        (name = "team", description = "Owner-scoped team management"),
        (name = "tournament", description = "Tournament management and roster operations"),
        (name = "admin", description = "Administrative overrides across all accounts"),
    )
)]
pub struct ApiDoc;
