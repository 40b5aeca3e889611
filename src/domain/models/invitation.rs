use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Created,
    Viewed,
    Accepted,
    Declined,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Created => "created",
            InvitationStatus::Viewed => "viewed",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Declined => "declined",
        }
    }

    /// Status after the guest opens the invitation. Only a fresh invitation
    /// moves; every later state is kept as is.
    pub fn on_view(self) -> Self {
        match self {
            InvitationStatus::Created => InvitationStatus::Viewed,
            other => other,
        }
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvitationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "created" => Ok(InvitationStatus::Created),
            "viewed" => Ok(InvitationStatus::Viewed),
            "accepted" => Ok(InvitationStatus::Accepted),
            "declined" => Ok(InvitationStatus::Declined),
            other => Err(format!("unknown invitation status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attendance {
    Yes,
    No,
}

impl Attendance {
    pub fn status(self) -> InvitationStatus {
        match self {
            Attendance::Yes => InvitationStatus::Accepted,
            Attendance::No => InvitationStatus::Declined,
        }
    }
}

impl FromStr for Attendance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(Attendance::Yes),
            "no" => Ok(Attendance::No),
            other => Err(format!("unknown attendance '{}'", other)),
        }
    }
}

/// One sheet row, whatever the layout. Columns a layout does not carry stay
/// empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationRecord {
    pub status: InvitationStatus,
    pub timestamp: String,
    pub admin_name: String,
    pub admin_comment: String,
    pub user_name: String,
    pub guest: String,
    pub message: String,
    pub uuid: String,
    pub invite_link: String,
}

/// The only shape of an invitation that leaves the server.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct PublicInvitation {
    pub status: InvitationStatus,
    pub name: String,
    pub guest: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalInvitation {
    pub timestamp: String,
    pub admin_name: String,
    pub admin_comment: String,
    pub uuid: String,
    pub invite_link: String,
}

impl InvitationRecord {
    pub fn split(self) -> (PublicInvitation, InternalInvitation) {
        let public = PublicInvitation {
            status: self.status,
            name: self.user_name,
            guest: self.guest,
            message: self.message,
        };
        let internal = InternalInvitation {
            timestamp: self.timestamp,
            admin_name: self.admin_name,
            admin_comment: self.admin_comment,
            uuid: self.uuid,
            invite_link: self.invite_link,
        };
        (public, internal)
    }
}
