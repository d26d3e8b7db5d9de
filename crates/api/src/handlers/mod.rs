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
