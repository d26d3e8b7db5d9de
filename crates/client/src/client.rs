//! Typed HTTP client for the CityVetCare REST API.
//!
//! One async method per endpoint. Success bodies may be wrapped in
//! `{ "data": ... }` or bare; both decode to the same type. Non-2xx
//! responses become [`ClientError::Http`] carrying the server's message.
//! Nothing is retried.

use std::time::Duration;

use cityvetcare_core::status::{AnimalStatus, AnnouncementStatus, Priority};
use cityvetcare_core::types::{Date, DbId};
use cityvetcare_core::upload::{extension_for, IMAGE_FIELD, MAX_FILES_PER_UPLOAD};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

use crate::config::ClientConfig;
use crate::error::{error_message, ClientError};
use crate::forms::{
    AdoptionRequestForm, AnnouncementForm, BulkIdsForm, CatcherTeamForm, ClinicForm,
    DecisionForm, IncidentReportForm, IncidentStatusForm, LoginForm, PetForm, PetOwnerForm,
    ReadingMaterialForm, RedemptionRequestForm, RegisterForm, StrayAnimalForm, VaccinationForm,
};
use crate::models::{
    AdoptionRequest, Announcement, ArchiveLogEntry, AuthSession, CatcherTeam, Clinic, FeedItem,
    Health, Incident, IncidentStats, NearbyClinic, Pet, PetOwner, ReadStateChange,
    ReadingMaterial, RedemptionRequest, StrayAnimal, UnreadCount, UploadedImages, User,
    VaccinationDue, VaccinationRecord,
};

const ADOPTIONS: &str = "/adoption-requests";
const REDEMPTIONS: &str = "/redemption-requests";

// ---------------------------------------------------------------------------
// List queries
// ---------------------------------------------------------------------------

/// Query string of `GET /incidents`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IncidentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub incident_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

/// Query string of `GET /reading-materials`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MaterialQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub material_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

/// Query string of the adoption / redemption list endpoints.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RequestQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animal_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

/// One image to upload.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// HTTP client for one CityVetCare backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
            token: None,
        }
    }

    /// Attach `Authorization: Bearer <token>` to subsequent requests.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- health and auth ----

    /// `GET /health`. A 503 (database down) surfaces as [`ClientError::Http`].
    pub async fn health(&self) -> Result<Health, ClientError> {
        let url = format!("{}/health", self.base_url);
        Self::parse_response(self.send(self.builder(Method::GET, url)).await?).await
    }

    pub async fn register(&self, form: &RegisterForm) -> Result<AuthSession, ClientError> {
        form.validate()?;
        self.post_json("/auth/register", form).await
    }

    /// Log in. The caller stores the returned token and passes it to
    /// [`set_token`](Self::set_token).
    pub async fn login(&self, form: &LoginForm) -> Result<AuthSession, ClientError> {
        form.validate()?;
        self.post_json("/auth/login", form).await
    }

    pub async fn me(&self) -> Result<User, ClientError> {
        self.get("/auth/me").await
    }

    // ---- incidents ----

    /// Submit a report. Anonymous when no token is set.
    pub async fn submit_incident(
        &self,
        form: &IncidentReportForm,
    ) -> Result<Incident, ClientError> {
        form.check(self.is_authenticated())?;
        self.post_json("/incidents", form).await
    }

    pub async fn list_incidents(
        &self,
        query: &IncidentQuery,
    ) -> Result<Vec<Incident>, ClientError> {
        self.get_query("/incidents", query).await
    }

    /// The caller's own reports ("My Reports").
    pub async fn my_incidents(&self, status: Option<&str>) -> Result<Vec<Incident>, ClientError> {
        self.get_query("/incidents/mine", &[("status", status)]).await
    }

    pub async fn incident_stats(&self) -> Result<IncidentStats, ClientError> {
        self.get("/incidents/stats").await
    }

    pub async fn get_incident(&self, id: DbId) -> Result<Incident, ClientError> {
        self.get(&format!("/incidents/{id}")).await
    }

    pub async fn update_incident(
        &self,
        id: DbId,
        form: &IncidentReportForm,
    ) -> Result<Incident, ClientError> {
        form.validate()?;
        self.put_json(&format!("/incidents/{id}"), form).await
    }

    pub async fn update_incident_status(
        &self,
        id: DbId,
        form: &IncidentStatusForm,
    ) -> Result<Incident, ClientError> {
        form.validate()?;
        self.put_json(&format!("/incidents/{id}/status"), form).await
    }

    pub async fn update_incident_priority(
        &self,
        id: DbId,
        priority: Priority,
    ) -> Result<Incident, ClientError> {
        let body = serde_json::json!({ "priority": priority });
        self.put_json(&format!("/incidents/{id}/priority"), &body).await
    }

    /// Replace the catcher teams assigned to an incident.
    pub async fn assign_catchers(
        &self,
        id: DbId,
        catcher_team_ids: &[DbId],
    ) -> Result<Incident, ClientError> {
        let body = serde_json::json!({ "catcher_team_ids": catcher_team_ids });
        self.put_json(&format!("/incidents/{id}/assign"), &body).await
    }

    pub async fn delete_incident(&self, id: DbId) -> Result<(), ClientError> {
        self.delete(&format!("/incidents/{id}")).await
    }

    // ---- catcher teams ----

    pub async fn list_catcher_teams(&self) -> Result<Vec<CatcherTeam>, ClientError> {
        self.get("/catcher-teams").await
    }

    pub async fn create_catcher_team(
        &self,
        form: &CatcherTeamForm,
    ) -> Result<CatcherTeam, ClientError> {
        form.validate()?;
        self.post_json("/catcher-teams", form).await
    }

    pub async fn update_catcher_team(
        &self,
        id: DbId,
        form: &CatcherTeamForm,
    ) -> Result<CatcherTeam, ClientError> {
        form.validate()?;
        self.put_json(&format!("/catcher-teams/{id}"), form).await
    }

    // ---- announcements ----

    pub async fn list_announcements(
        &self,
        status: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<Announcement>, ClientError> {
        self.get_query("/announcements", &[("status", status), ("category", category)])
            .await
    }

    pub async fn announcement_feed(&self, unread_only: bool) -> Result<Vec<FeedItem>, ClientError> {
        self.get_query("/announcements/feed", &[("unread_only", unread_only)])
            .await
    }

    pub async fn unread_count(&self) -> Result<i64, ClientError> {
        let count: UnreadCount = self.get("/announcements/unread-count").await?;
        Ok(count.unread_count)
    }

    pub async fn get_announcement(&self, id: DbId) -> Result<Announcement, ClientError> {
        self.get(&format!("/announcements/{id}")).await
    }

    pub async fn create_announcement(
        &self,
        form: &AnnouncementForm,
    ) -> Result<Announcement, ClientError> {
        form.validate()?;
        self.post_json("/announcements", form).await
    }

    pub async fn update_announcement(
        &self,
        id: DbId,
        form: &AnnouncementForm,
    ) -> Result<Announcement, ClientError> {
        form.validate()?;
        self.put_json(&format!("/announcements/{id}"), form).await
    }

    pub async fn update_announcement_status(
        &self,
        id: DbId,
        status: AnnouncementStatus,
    ) -> Result<Announcement, ClientError> {
        let body = serde_json::json!({ "status": status });
        self.put_json(&format!("/announcements/{id}/status"), &body).await
    }

    pub async fn delete_announcement(&self, id: DbId) -> Result<(), ClientError> {
        self.delete(&format!("/announcements/{id}")).await
    }

    /// Idempotent; `changed` is 1 only the first time.
    pub async fn mark_announcement_read(&self, id: DbId) -> Result<ReadStateChange, ClientError> {
        self.post_empty(&format!("/announcements/{id}/read")).await
    }

    pub async fn mark_all_announcements_read(&self) -> Result<ReadStateChange, ClientError> {
        self.post_empty("/announcements/read-all").await
    }

    pub async fn hide_announcement(&self, id: DbId) -> Result<(), ClientError> {
        let builder = self.request(Method::POST, &format!("/announcements/{id}/hide"));
        Self::check_status(self.send(builder).await?).await
    }

    pub async fn unhide_announcement(&self, id: DbId) -> Result<(), ClientError> {
        let builder = self.request(Method::POST, &format!("/announcements/{id}/unhide"));
        Self::check_status(self.send(builder).await?).await
    }

    // ---- reading materials ----

    pub async fn list_reading_materials(
        &self,
        query: &MaterialQuery,
    ) -> Result<Vec<ReadingMaterial>, ClientError> {
        self.get_query("/reading-materials", query).await
    }

    pub async fn get_reading_material(&self, id: DbId) -> Result<ReadingMaterial, ClientError> {
        self.get(&format!("/reading-materials/{id}")).await
    }

    pub async fn create_reading_material(
        &self,
        form: &ReadingMaterialForm,
    ) -> Result<ReadingMaterial, ClientError> {
        form.validate()?;
        self.post_json("/reading-materials", form).await
    }

    pub async fn update_reading_material(
        &self,
        id: DbId,
        form: &ReadingMaterialForm,
    ) -> Result<ReadingMaterial, ClientError> {
        form.validate()?;
        self.put_json(&format!("/reading-materials/{id}"), form).await
    }

    pub async fn delete_reading_material(&self, id: DbId) -> Result<(), ClientError> {
        self.delete(&format!("/reading-materials/{id}")).await
    }

    pub async fn archive_reading_material(
        &self,
        id: DbId,
        reason: Option<&str>,
    ) -> Result<ReadingMaterial, ClientError> {
        let body = serde_json::json!({ "reason": reason });
        self.post_json(&format!("/reading-materials/{id}/archive"), &body).await
    }

    pub async fn restore_reading_material(&self, id: DbId) -> Result<ReadingMaterial, ClientError> {
        self.post_empty(&format!("/reading-materials/{id}/restore")).await
    }

    pub async fn archive_history(
        &self,
        material_id: DbId,
    ) -> Result<Vec<ArchiveLogEntry>, ClientError> {
        self.get_query("/reading-materials/archive-history", &[("material_id", material_id)])
            .await
    }

    /// All-or-nothing: one bad id fails the whole batch.
    pub async fn bulk_archive(
        &self,
        form: &BulkIdsForm,
    ) -> Result<Vec<ReadingMaterial>, ClientError> {
        form.validate()?;
        self.post_json("/reading-materials/bulk-archive", form).await
    }

    pub async fn bulk_publish(
        &self,
        form: &BulkIdsForm,
    ) -> Result<Vec<ReadingMaterial>, ClientError> {
        form.validate()?;
        self.post_json("/reading-materials/bulk-publish", form).await
    }

    // ---- stray animals ----

    pub async fn list_stray_animals(
        &self,
        status: Option<&str>,
    ) -> Result<Vec<StrayAnimal>, ClientError> {
        self.get_query("/stray-animals", &[("status", status)]).await
    }

    /// Animals still in custody, open for adoption or redemption.
    pub async fn available_animals(&self) -> Result<Vec<StrayAnimal>, ClientError> {
        self.get("/stray-animals/available").await
    }

    pub async fn get_stray_animal(&self, id: DbId) -> Result<StrayAnimal, ClientError> {
        self.get(&format!("/stray-animals/{id}")).await
    }

    pub async fn create_stray_animal(
        &self,
        form: &StrayAnimalForm,
    ) -> Result<StrayAnimal, ClientError> {
        form.validate()?;
        self.post_json("/stray-animals", form).await
    }

    pub async fn update_stray_animal(
        &self,
        id: DbId,
        form: &StrayAnimalForm,
    ) -> Result<StrayAnimal, ClientError> {
        form.validate()?;
        self.put_json(&format!("/stray-animals/{id}"), form).await
    }

    pub async fn update_stray_animal_status(
        &self,
        id: DbId,
        status: AnimalStatus,
        notes: Option<&str>,
    ) -> Result<StrayAnimal, ClientError> {
        let body = serde_json::json!({ "status": status, "notes": notes });
        self.put_json(&format!("/stray-animals/{id}/status"), &body).await
    }

    // ---- adoption requests ----

    pub async fn create_adoption_request(
        &self,
        form: &AdoptionRequestForm,
    ) -> Result<AdoptionRequest, ClientError> {
        form.validate()?;
        self.post_json(ADOPTIONS, form).await
    }

    pub async fn list_adoption_requests(
        &self,
        query: &RequestQuery,
    ) -> Result<Vec<AdoptionRequest>, ClientError> {
        self.get_query(ADOPTIONS, query).await
    }

    pub async fn my_adoption_requests(&self) -> Result<Vec<AdoptionRequest>, ClientError> {
        self.get(&format!("{ADOPTIONS}/mine")).await
    }

    pub async fn get_adoption_request(&self, id: DbId) -> Result<AdoptionRequest, ClientError> {
        self.get(&format!("{ADOPTIONS}/{id}")).await
    }

    /// Approve or reject. Blocked locally when rejecting without a reason.
    pub async fn decide_adoption_request(
        &self,
        id: DbId,
        form: &DecisionForm,
    ) -> Result<AdoptionRequest, ClientError> {
        self.decide(ADOPTIONS, id, form).await
    }

    pub async fn archive_adoption_request(&self, id: DbId) -> Result<AdoptionRequest, ClientError> {
        self.post_empty(&format!("{ADOPTIONS}/{id}/archive")).await
    }

    // ---- redemption requests ----

    pub async fn create_redemption_request(
        &self,
        form: &RedemptionRequestForm,
    ) -> Result<RedemptionRequest, ClientError> {
        form.validate()?;
        self.post_json(REDEMPTIONS, form).await
    }

    pub async fn list_redemption_requests(
        &self,
        query: &RequestQuery,
    ) -> Result<Vec<RedemptionRequest>, ClientError> {
        self.get_query(REDEMPTIONS, query).await
    }

    pub async fn my_redemption_requests(&self) -> Result<Vec<RedemptionRequest>, ClientError> {
        self.get(&format!("{REDEMPTIONS}/mine")).await
    }

    pub async fn get_redemption_request(&self, id: DbId) -> Result<RedemptionRequest, ClientError> {
        self.get(&format!("{REDEMPTIONS}/{id}")).await
    }

    pub async fn decide_redemption_request(
        &self,
        id: DbId,
        form: &DecisionForm,
    ) -> Result<RedemptionRequest, ClientError> {
        self.decide(REDEMPTIONS, id, form).await
    }

    pub async fn archive_redemption_request(
        &self,
        id: DbId,
    ) -> Result<RedemptionRequest, ClientError> {
        self.post_empty(&format!("{REDEMPTIONS}/{id}/archive")).await
    }

    // ---- pets and vaccinations ----

    pub async fn list_pet_owners(&self) -> Result<Vec<PetOwner>, ClientError> {
        self.get("/pet-owners").await
    }

    pub async fn create_pet_owner(&self, form: &PetOwnerForm) -> Result<PetOwner, ClientError> {
        form.validate()?;
        self.post_json("/pet-owners", form).await
    }

    pub async fn list_pets(&self, owner_id: Option<DbId>) -> Result<Vec<Pet>, ClientError> {
        self.get_query("/pets", &[("owner_id", owner_id)]).await
    }

    pub async fn create_pet(&self, form: &PetForm) -> Result<Pet, ClientError> {
        form.validate()?;
        self.post_json("/pets", form).await
    }

    pub async fn pet_vaccinations(
        &self,
        pet_id: DbId,
    ) -> Result<Vec<VaccinationRecord>, ClientError> {
        self.get(&format!("/pets/{pet_id}/vaccinations")).await
    }

    pub async fn create_vaccination(
        &self,
        form: &VaccinationForm,
    ) -> Result<VaccinationRecord, ClientError> {
        form.validate()?;
        self.post_json("/vaccinations", form).await
    }

    pub async fn update_vaccination(
        &self,
        id: DbId,
        form: &VaccinationForm,
    ) -> Result<VaccinationRecord, ClientError> {
        form.validate()?;
        self.put_json(&format!("/vaccinations/{id}"), form).await
    }

    pub async fn delete_vaccination(&self, id: DbId) -> Result<(), ClientError> {
        self.delete(&format!("/vaccinations/{id}")).await
    }

    /// Vaccinations due on or before `before` (server default: 30 days out).
    pub async fn vaccinations_due(
        &self,
        before: Option<Date>,
    ) -> Result<Vec<VaccinationDue>, ClientError> {
        self.get_query("/vaccinations/due", &[("before", before)]).await
    }

    // ---- clinics ----

    pub async fn list_clinics(&self, status: Option<&str>) -> Result<Vec<Clinic>, ClientError> {
        self.get_query("/clinics", &[("status", status)]).await
    }

    /// Active clinics within `radius_km`, nearest first.
    pub async fn nearby_clinics(
        &self,
        lat: f64,
        lng: f64,
        radius_km: Option<f64>,
    ) -> Result<Vec<NearbyClinic>, ClientError> {
        #[derive(Serialize)]
        struct Nearby {
            lat: f64,
            lng: f64,
            #[serde(skip_serializing_if = "Option::is_none")]
            radius_km: Option<f64>,
        }
        self.get_query("/clinics/nearby", &Nearby { lat, lng, radius_km })
            .await
    }

    pub async fn get_clinic(&self, id: DbId) -> Result<Clinic, ClientError> {
        self.get(&format!("/clinics/{id}")).await
    }

    pub async fn create_clinic(&self, form: &ClinicForm) -> Result<Clinic, ClientError> {
        form.validate()?;
        self.post_json("/clinics", form).await
    }

    pub async fn update_clinic(&self, id: DbId, form: &ClinicForm) -> Result<Clinic, ClientError> {
        form.validate()?;
        self.put_json(&format!("/clinics/{id}"), form).await
    }

    pub async fn delete_clinic(&self, id: DbId) -> Result<(), ClientError> {
        self.delete(&format!("/clinics/{id}")).await
    }

    // ---- uploads ----

    /// Upload images as multipart field `images`; returns the public URLs
    /// in upload order.
    pub async fn upload_images(&self, files: Vec<ImageFile>) -> Result<Vec<String>, ClientError> {
        if files.is_empty() {
            return Err(ClientError::Validation("No images selected".into()));
        }
        if files.len() > MAX_FILES_PER_UPLOAD {
            return Err(ClientError::Validation(format!(
                "At most {MAX_FILES_PER_UPLOAD} images can be uploaded at once"
            )));
        }

        let mut form = reqwest::multipart::Form::new();
        for file in files {
            extension_for(&file.content_type)
                .map_err(|e| ClientError::Validation(e.to_string()))?;
            if file.bytes.is_empty() {
                return Err(ClientError::Validation(format!(
                    "{} is empty",
                    file.file_name
                )));
            }
            let part = reqwest::multipart::Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.content_type)
                .map_err(|e| ClientError::Validation(e.to_string()))?;
            form = form.part(IMAGE_FIELD, part);
        }

        let builder = self.request(Method::POST, "/upload-images").multipart(form);
        let uploaded: UploadedImages = Self::parse_response(self.send(builder).await?).await?;
        Ok(uploaded.images)
    }

    // ---- private helpers ----

    async fn decide<T: DeserializeOwned>(
        &self,
        prefix: &str,
        id: DbId,
        form: &DecisionForm,
    ) -> Result<T, ClientError> {
        form.validate()?;
        self.post_json(&format!("{prefix}/{id}/decision"), form).await
    }

    fn builder(&self, method: Method, url: String) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, url).timeout(self.timeout);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Builder for an `/api`-relative path.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.builder(method, format!("{}/api{}", self.base_url, path))
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ClientError> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(error = %e, "API request failed to complete");
            ClientError::from(e)
        })?;
        tracing::debug!(
            url = %response.url(),
            status = response.status().as_u16(),
            "API response received",
        );
        Ok(response)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::parse_response(response).await
    }

    async fn get_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ClientError> {
        let response = self
            .send(self.request(Method::GET, path).query(query))
            .await?;
        Self::parse_response(response).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        Self::parse_response(response).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.send(self.request(Method::POST, path)).await?;
        Self::parse_response(response).await
    }

    async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .send(self.request(Method::PUT, path).json(body))
            .await?;
        Self::parse_response(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let response = self.send(self.request(Method::DELETE, path)).await?;
        Self::check_status(response).await
    }

    /// Map a non-2xx response to [`ClientError::Http`] with the server's
    /// message.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);
            tracing::warn!(status = status.as_u16(), %message, "API returned an error");
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        unwrap_envelope(value)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// Decode `{ "data": T }` or a bare `T`.
pub fn unwrap_envelope<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, ClientError> {
    let inner = match value {
        serde_json::Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(serde_json::Value::Null)
        }
        other => other,
    };
    Ok(serde_json::from_value(inner)?)
}
