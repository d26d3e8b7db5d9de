pub mod announcements;
pub mod auth;
pub mod catcher_teams;
pub mod clinics;
pub mod health;
pub mod incidents;
pub mod reading_materials;
pub mod requests;
pub mod stray_animals;
pub mod uploads;
pub mod vaccinations;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register citizen (public)
/// /auth/login                                      login (public)
/// /auth/me                                         current user (auth)
///
/// /incidents                                       list (staff), submit (optional auth)
/// /incidents/mine                                  caller's reports (auth)
/// /incidents/stats                                 count per status (staff)
/// /incidents/{id}                                  get, update (staff), delete (admin)
/// /incidents/{id}/status                           set status (staff)
/// /incidents/{id}/priority                         set priority (staff)
/// /incidents/{id}/assign                           replace catcher teams (staff)
///
/// /catcher-teams                                   list, create (staff)
/// /catcher-teams/{id}                              update (staff)
///
/// /announcements                                   list (public), create (staff)
/// /announcements/feed                              per-user feed (auth)
/// /announcements/unread-count                      unread counter (auth)
/// /announcements/read-all                          mark all read (auth)
/// /announcements/{id}                              get, update (staff), delete (admin)
/// /announcements/{id}/status                       set status (staff)
/// /announcements/{id}/read                         mark read (auth)
/// /announcements/{id}/hide                         hide (auth)
/// /announcements/{id}/unhide                       unhide (auth)
///
/// /reading-materials                               list, create (staff)
/// /reading-materials/archive-history               archive log (staff)
/// /reading-materials/bulk-archive                  archive many (staff)
/// /reading-materials/bulk-publish                  publish many (staff)
/// /reading-materials/{id}                          get, update (staff), delete (admin)
/// /reading-materials/{id}/archive                  archive (staff)
/// /reading-materials/{id}/restore                  restore (staff)
///
/// /stray-animals                                   list, create (staff)
/// /stray-animals/available                         in-custody animals (public)
/// /stray-animals/{id}                              get, update (staff)
/// /stray-animals/{id}/status                       set status (staff)
///
/// /pet-owners                                      list, create (staff)
/// /pets                                            list, create (staff)
/// /pets/{id}/vaccinations                          vaccination history (staff)
/// /vaccinations                                    record (staff)
/// /vaccinations/due                                due soon (staff)
/// /vaccinations/{id}                               update, delete (staff)
///
/// /adoption-requests                               list (staff), submit (auth)
/// /adoption-requests/mine                          caller's requests (auth)
/// /adoption-requests/{id}                          get (staff or applicant)
/// /adoption-requests/{id}/decision                 approve / reject (staff)
/// /adoption-requests/{id}/archive                  archive (staff)
///
/// /redemption-requests                             same shape as adoption requests
/// /redemption-requests/{id}                        POST: legacy decision (staff)
///
/// /clinics                                         list (public), create (admin)
/// /clinics/nearby                                  closest active clinics (public)
/// /clinics/{id}                                    get, update, delete (admin)
/// ```
///
/// `/upload-images` is mounted separately by the app router because it
/// carries its own body limit.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/incidents", incidents::router())
        .nest("/catcher-teams", catcher_teams::router())
        .nest("/announcements", announcements::router())
        .nest("/reading-materials", reading_materials::router())
        .nest("/stray-animals", stray_animals::router())
        .merge(vaccinations::router())
        .nest("/adoption-requests", requests::adoption_router())
        .nest("/redemption-requests", requests::redemption_router())
        .nest("/clinics", clinics::router())
}
