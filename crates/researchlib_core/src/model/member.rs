//! Library member profile.
//!
//! Holds the minimum personal data needed for circulation bookkeeping.
//!
//! # Invariants
//! - `name` and `email` are sanitized and non-empty.
//! - Unknown member types fall back to `student`; unknown statuses to `active`.

use crate::model::fields::{generate_unique_id, sanitize_input, today_stamp};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Prefix used for generated library card identifiers.
pub const CARD_ID_PREFIX: &str = "CARD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberError {
    EmptyName,
    EmptyEmail,
}

impl Display for MemberError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "member name must be a non-empty string"),
            Self::EmptyEmail => write!(f, "email must be a non-empty string"),
        }
    }
}

impl Error for MemberError {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberType {
    #[default]
    Student,
    Faculty,
    Staff,
    Guest,
}

impl MemberType {
    /// Parses a member type, falling back to `Student` for unknown values.
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "faculty" => Self::Faculty,
            "staff" => Self::Staff,
            "guest" => Self::Guest,
            _ => Self::Student,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
            Self::Staff => "staff",
            Self::Guest => "guest",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    #[default]
    Active,
    Blocked,
    Expired,
}

impl MemberStatus {
    /// Parses a status, falling back to `Active` for unknown values.
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "blocked" => Self::Blocked,
            "expired" => Self::Expired,
            _ => Self::Active,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Blocked => "blocked",
            Self::Expired => "expired",
        }
    }
}

/// Circulation counters kept per member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberStats {
    pub checkouts: u32,
    pub overdues: u32,
    pub fines_outstanding: f64,
}

/// Serialized member shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub member_type: MemberType,
    pub status: MemberStatus,
    pub card_id: String,
    pub registered: String,
    pub stats: MemberStats,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    name: String,
    email: String,
    member_type: MemberType,
    status: MemberStatus,
    card_id: String,
    registered: String,
    stats: MemberStats,
}

impl Member {
    /// Registers a member with a generated card id and `active` status.
    pub fn new(name: &str, email: &str, member_type: MemberType) -> Result<Self, MemberError> {
        let name = sanitize_input(name);
        if name.is_empty() {
            return Err(MemberError::EmptyName);
        }
        let email = sanitize_input(email);
        if email.is_empty() {
            return Err(MemberError::EmptyEmail);
        }

        Ok(Self {
            name,
            email,
            member_type,
            status: MemberStatus::Active,
            card_id: generate_unique_id(CARD_ID_PREFIX),
            registered: today_stamp(),
            stats: MemberStats::default(),
        })
    }

    /// Keeps an externally issued card id instead of generating one.
    pub fn with_card_id(mut self, card_id: &str) -> Self {
        let card_id = sanitize_input(card_id);
        if !card_id.is_empty() {
            self.card_id = card_id;
        }
        self
    }

    pub fn with_status(mut self, status: MemberStatus) -> Self {
        self.status = status;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn card_id(&self) -> &str {
        &self.card_id
    }

    pub fn member_type(&self) -> MemberType {
        self.member_type
    }

    pub fn status(&self) -> MemberStatus {
        self.status
    }

    pub fn stats(&self) -> &MemberStats {
        &self.stats
    }

    /// Temporarily disables circulation privileges.
    pub fn block(&mut self) {
        self.status = MemberStatus::Blocked;
    }

    /// Reinstates circulation privileges.
    pub fn unblock(&mut self) {
        self.status = MemberStatus::Active;
    }

    pub fn to_record(&self) -> MemberRecord {
        MemberRecord {
            name: self.name.clone(),
            email: self.email.clone(),
            member_type: self.member_type,
            status: self.status,
            card_id: self.card_id.clone(),
            registered: self.registered.clone(),
            stats: self.stats.clone(),
        }
    }
}

impl Display for Member {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Member: {} ({}) {}",
            self.name,
            self.member_type.as_str(),
            self.status.as_str()
        )
    }
}
