/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskhub_api::{app::{build_router, AppState}, config::Config};
/// use taskhub_shared::store::MemoryStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemoryStore::new()), config);
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError, middleware::security::SecurityHeadersLayer};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use taskhub_shared::{
    auth::{context::AuthContext, jwt},
    services::{AccountService, ProjectService, TaskService},
    store::Store,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request via Axum's `State` extractor. Everything inside
/// is behind an `Arc`, so clones are cheap.
#[derive(Clone)]
pub struct AppState {
    /// Persistence handle shared by all services
    pub store: Arc<dyn Store>,

    pub accounts: AccountService,

    pub projects: ProjectService,

    pub tasks: TaskService,

    pub config: Arc<Config>,
}

impl AppState {
    /// Wires the services around one store handle
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        let projects = ProjectService::new(store.clone());
        let tasks = TaskService::new(store.clone(), projects.clone());
        let accounts = AccountService::new(store.clone(), config.jwt.secret.as_str());

        Self {
            store,
            accounts,
            projects,
            tasks,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── GET  /health              # public
/// ├── /auth/                    # public
/// │   ├── POST /register
/// │   ├── POST /login
/// │   └── POST /refresh
/// ├── /projects                 # JWT
/// │   ├── POST   /
/// │   ├── GET    /?page&limit
/// │   ├── PUT    /:id
/// │   └── DELETE /:id
/// └── /tasks                    # JWT
///     ├── POST   /
///     ├── GET    /:projectId?status&page&limit
///     ├── PUT    /:id
///     └── DELETE /:id
/// ```
///
/// `GET /tasks/:id` and `PUT|DELETE /tasks/:id` share one path pattern; the
/// first segment is a project id for GET and a task id otherwise.
///
/// # Middleware Stack
///
/// Outermost first: security headers, CORS, request tracing, then the JWT
/// layer on protected routes.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh));

    let project_routes = Router::new()
        .route(
            "/",
            post(routes::projects::create_project).get(routes::projects::list_projects),
        )
        .route(
            "/:id",
            put(routes::projects::update_project).delete(routes::projects::delete_project),
        );

    let task_routes = Router::new()
        .route("/", post(routes::tasks::create_task))
        .route(
            "/:id",
            get(routes::tasks::list_tasks)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        );

    let protected_routes = Router::new()
        .nest("/projects", project_routes)
        .nest("/tasks", task_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let cors = if state.config.api.cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/auth", auth_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Validates the `Authorization: Bearer <token>` header as an access token
/// and injects [`AuthContext`] into the request extensions.
async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Expected Bearer token".to_string()))?;

    let claims = jwt::validate_access_token(token, state.jwt_secret())?;

    req.extensions_mut().insert(AuthContext::from_claims(&claims));

    Ok(next.run(req).await)
}
