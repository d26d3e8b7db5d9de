//! Closed status and category enums for every entity.
//!
//! Clients historically sent mixed vocabularies (`"Pending"`, `"pending"`,
//! `"Pending Review"`, `"In Progress"`). Every enum here exposes a single
//! [`normalize`](IncidentStatus::normalize) entry point used at the API
//! boundary; storage and responses always use the canonical snake_case form.

use crate::error::CoreError;

/// Common behaviour of the enums generated by `define_status_enum!`.
pub trait StatusEnum: Sized + Copy + 'static {
    /// Human-readable name used in validation messages.
    const LABEL: &'static str;

    /// Every variant, in declaration order.
    fn all() -> &'static [Self];

    /// Canonical storage / wire form.
    fn as_str(self) -> &'static str;

    /// Parse a client-supplied value, accepting legacy spellings.
    fn normalize(raw: &str) -> Result<Self, CoreError>;
}

/// Lower-case, trim and fold spaces / hyphens into underscores.
pub fn normalize_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            /// Canonical storage / wire form.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }

            /// Parse a client-supplied value, accepting legacy spellings.
            pub fn normalize(raw: &str) -> Result<Self, CoreError> {
                let key = normalize_key(raw);
                $(
                    if key == $text $(|| key == $alias)* {
                        return Ok($name::$variant);
                    }
                )+
                Err(CoreError::Validation(format!(
                    "Invalid {} '{}'. Must be one of: {}",
                    $label,
                    raw,
                    [$($text),+].join(", ")
                )))
            }
        }

        impl StatusEnum for $name {
            const LABEL: &'static str = $label;

            fn all() -> &'static [Self] {
                &[$( $name::$variant ),+]
            }

            fn as_str(self) -> &'static str {
                $name::as_str(self)
            }

            fn normalize(raw: &str) -> Result<Self, CoreError> {
                $name::normalize(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::normalize(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                $name::normalize(&value)
            }
        }
    };
}

define_status_enum! {
    /// Lifecycle of a citizen incident report.
    IncidentStatus ("incident status") {
        Pending => "pending" | "pending_review" | "new" | "submitted",
        Approved => "approved" | "verified",
        InProgress => "in_progress" | "ongoing",
        Resolved => "resolved" | "completed" | "done" | "closed",
        Rejected => "rejected" | "declined",
        ScheduledForPatrol => "scheduled_for_patrol" | "scheduled" | "for_patrol",
    }
}

define_status_enum! {
    /// Urgency shared by incidents and announcements.
    Priority ("priority") {
        Low => "low",
        Medium => "medium" | "normal",
        High => "high",
        Urgent => "urgent" | "critical" | "emergency",
    }
}

define_status_enum! {
    /// Kind of animal-related event being reported.
    IncidentType ("incident type") {
        Bite => "bite" | "animal_bite" | "bite_incident",
        Stray => "stray" | "stray_animal" | "stray_sighting",
        LostPet => "lost_pet" | "lost" | "missing_pet",
        Abuse => "abuse" | "animal_abuse" | "cruelty",
        Other => "other",
    }
}

define_status_enum! {
    /// Publication state of an announcement.
    AnnouncementStatus ("announcement status") {
        Draft => "draft",
        Published => "published" | "active",
        Archived => "archived",
    }
}

define_status_enum! {
    AnnouncementCategory ("announcement category") {
        General => "general",
        Health => "health" | "health_advisory",
        Event => "event" | "events",
        Campaign => "campaign" | "vaccination_campaign",
        Emergency => "emergency" | "alert",
    }
}

define_status_enum! {
    /// Publication state of a reading material.
    MaterialStatus ("reading material status") {
        Draft => "draft",
        Published => "published" | "active",
        Archived => "archived",
    }
}

define_status_enum! {
    MaterialType ("reading material type") {
        Book => "book",
        Article => "article",
        Website => "website" | "link",
    }
}

define_status_enum! {
    /// Workflow state shared by adoption and redemption requests.
    RequestStatus ("request status") {
        Pending => "pending" | "pending_review" | "submitted",
        Approved => "approved",
        Rejected => "rejected" | "declined",
        Archived => "archived",
    }
}

define_status_enum! {
    /// Custody state of an impounded stray animal.
    AnimalStatus ("animal status") {
        InCustody => "in_custody" | "impounded" | "captured" | "available",
        Adopted => "adopted",
        Redeemed => "redeemed" | "claimed",
        Euthanized => "euthanized",
        Released => "released",
    }
}

define_status_enum! {
    ClinicStatus ("clinic status") {
        Active => "active" | "open",
        Inactive => "inactive" | "closed",
        Pending => "pending",
    }
}

define_status_enum! {
    CatcherTeamStatus ("catcher team status") {
        Active => "active",
        Inactive => "inactive",
    }
}

/// A parsed `?status=` list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter<T> {
    /// No filter supplied; the endpoint applies its default view.
    Default,
    /// The `all` keyword: no status restriction at all.
    All,
    /// Exactly one status.
    Only(T),
}

impl<T: StatusEnum> StatusFilter<T> {
    /// Parse an optional query value. Blank values count as absent.
    pub fn parse(raw: Option<&str>) -> Result<Self, CoreError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(StatusFilter::Default),
            Some(s) if normalize_key(s) == "all" => Ok(StatusFilter::All),
            Some(s) => T::normalize(s).map(StatusFilter::Only),
        }
    }

    /// The single requested status, if any.
    pub fn only(self) -> Option<T> {
        match self {
            StatusFilter::Only(status) => Some(status),
            StatusFilter::Default | StatusFilter::All => None,
        }
    }
}
