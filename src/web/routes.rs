// src/web/routes.rs
use crate::{
    state::AppState,
    web::{admin_handlers, auth_handlers, mw_auth, siswa_handlers, system_handlers},
};
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

pub fn create_router(app_state: AppState) -> Router {
    // --- Public API ---
    let public_api = Router::new()
        .route("/", get(system_handlers::api_index))
        .route("/login", post(auth_handlers::handle_login))
        .route(
            "/siswa",
            get(siswa_handlers::list_siswa).post(siswa_handlers::create_siswa),
        )
        .route("/siswa/{id}", get(siswa_handlers::get_siswa))
        .route("/siswa/{id}/pdf", get(siswa_handlers::render_kartu_pdf))
        .route(
            "/siswa/{id}/preview",
            get(siswa_handlers::render_kartu_preview),
        )
        .route("/print/{id}", get(siswa_handlers::redirect_print))
        .route("/stats", get(admin_handlers::get_stats))
        .route("/search", get(siswa_handlers::search_siswa))
        .route("/check-nis/{nis}", get(siswa_handlers::check_nis))
        .route("/settings", get(system_handlers::get_settings))
        .route("/upload", post(system_handlers::upload_foto))
        .route("/health", get(system_handlers::health));

    // --- Protected API ---
    // Mutations on students plus the admin-only views sit behind the bearer
    // token check.
    let protected_api = Router::new()
        .route("/register", post(auth_handlers::handle_register))
        .route("/siswa/{id}", put(siswa_handlers::update_siswa))
        .route("/siswa/{id}", delete(siswa_handlers::delete_siswa))
        .route("/dashboard", get(admin_handlers::get_dashboard))
        .route("/backup", get(admin_handlers::get_backup))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_auth::require_auth,
        ));

    Router::new()
        .nest("/api", public_api.merge(protected_api))
        .fallback(system_handlers::fallback_404)
        .with_state(app_state)
}
