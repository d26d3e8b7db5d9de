//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod announcement_repo;
pub mod catcher_team_repo;
pub mod clinic_repo;
pub mod incident_repo;
pub mod pet_repo;
pub mod reading_material_repo;
pub mod request_repo;
pub mod stray_animal_repo;
pub mod user_repo;
pub mod vaccination_repo;

pub use announcement_repo::AnnouncementRepo;
pub use catcher_team_repo::CatcherTeamRepo;
pub use clinic_repo::ClinicRepo;
pub use incident_repo::IncidentRepo;
pub use pet_repo::{PetOwnerRepo, PetRepo};
pub use reading_material_repo::ReadingMaterialRepo;
pub use request_repo::{AdoptionRequestRepo, RedemptionRequestRepo, RequestRepo};
pub use stray_animal_repo::StrayAnimalRepo;
pub use user_repo::UserRepo;
pub use vaccination_repo::VaccinationRepo;
