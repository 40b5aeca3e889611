use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::models::invitation::{Attendance, InvitationRecord, InvitationStatus, PublicInvitation};
use crate::domain::ports::SheetStore;
use crate::domain::services::row_mapper::{find_by_uuid, to_row, SheetLayout};
use crate::error::AppError;

const MAX_ID_ATTEMPTS: usize = 3;

#[derive(Debug, Clone)]
pub struct RsvpSubmission {
    pub attendance: Attendance,
    pub name: String,
    pub guest: String,
    pub message: String,
    pub uuid: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewInvitation {
    pub admin_name: String,
    pub admin_comment: String,
}

#[derive(Debug, Clone)]
pub struct CreatedInvitation {
    pub uuid: String,
    pub invite_link: String,
}

pub struct InvitationService {
    store: Arc<dyn SheetStore>,
    sheet: String,
    layout: SheetLayout,
    timezone: Tz,
    invite_base_url: String,
}

impl InvitationService {
    pub fn new(
        store: Arc<dyn SheetStore>,
        sheet: String,
        layout: SheetLayout,
        timezone: Tz,
        invite_base_url: String,
    ) -> Self {
        Self { store, sheet, layout, timezone, invite_base_url }
    }

    pub async fn submit_rsvp(&self, submission: RsvpSubmission) -> Result<(), AppError> {
        let status = submission.attendance.status();
        let timestamp = format_timestamp(Utc::now(), self.timezone);

        let Some(uuid) = submission.uuid else {
            let record = InvitationRecord {
                status,
                timestamp,
                admin_name: String::new(),
                admin_comment: String::new(),
                user_name: submission.name,
                guest: submission.guest,
                message: submission.message,
                uuid: String::new(),
                invite_link: String::new(),
            };
            self.store.append_row(&self.sheet, &to_row(self.layout, &record)).await?;
            info!(status = %status, "Anonymous RSVP recorded");
            return Ok(());
        };

        if self.layout.uuid_column().is_none() {
            return Err(AppError::invalid_field("uuid"));
        }

        let (row_number, mut record) = self.locate(&uuid).await?;
        record.status = status;
        record.timestamp = timestamp;
        if !submission.name.is_empty() {
            record.user_name = submission.name;
        }
        record.guest = submission.guest;
        record.message = submission.message;

        self.store.update_row(&self.sheet, row_number, &to_row(self.layout, &record)).await?;
        info!(uuid = %uuid, status = %status, "RSVP recorded for invitation");
        Ok(())
    }

    pub async fn create_invitation(&self, invitation: NewInvitation) -> Result<CreatedInvitation, AppError> {
        let Some(column) = self.layout.uuid_column() else {
            return Err(AppError::NotFound("invitation links are disabled for the responses layout".into()));
        };

        let rows = self.store.get_all_rows(&self.sheet).await?;
        let taken: HashSet<&str> = rows.iter()
            .filter_map(|row| row.get(column))
            .map(|id| id.trim())
            .collect();

        let uuid = (0..MAX_ID_ATTEMPTS)
            .map(|_| Uuid::new_v4().to_string())
            .find(|candidate| {
                let free = !taken.contains(candidate.as_str());
                if !free {
                    warn!("Generated invitation id {} already exists, regenerating", candidate);
                }
                free
            })
            .ok_or(AppError::Internal)?;

        let invite_link = format!("{}/invite/{}", self.invite_base_url.trim_end_matches('/'), uuid);

        let record = InvitationRecord {
            status: InvitationStatus::Created,
            timestamp: format_timestamp(Utc::now(), self.timezone),
            admin_name: invitation.admin_name,
            admin_comment: invitation.admin_comment,
            user_name: String::new(),
            guest: String::new(),
            message: String::new(),
            uuid: uuid.clone(),
            invite_link: invite_link.clone(),
        };

        self.store.append_row(&self.sheet, &to_row(self.layout, &record)).await?;
        info!(uuid = %uuid, "Invitation created");

        Ok(CreatedInvitation { uuid, invite_link })
    }

    /// Marks the invitation as seen and returns what the guest may see.
    pub async fn view_invitation(&self, uuid: &str) -> Result<PublicInvitation, AppError> {
        if self.layout.uuid_column().is_none() {
            return Err(AppError::NotFound(format!("invitation {}", uuid)));
        }

        let (row_number, mut record) = self.locate(uuid).await?;
        let previous = record.status;
        record.status = record.status.on_view();
        record.timestamp = format_timestamp(Utc::now(), self.timezone);

        self.store.update_row(&self.sheet, row_number, &to_row(self.layout, &record)).await?;
        info!(uuid = %uuid, from = %previous, to = %record.status, "Invitation viewed");

        Ok(record.split().0)
    }

    // 1-based sheet row number plus the parsed record. Ids arrive in whatever
    // form the link was retyped in; the sheet holds the lowercase hyphenated one.
    async fn locate(&self, uuid: &str) -> Result<(usize, InvitationRecord), AppError> {
        // Not a UUID means it was never issued here; skip the sheet round trip.
        let id = Uuid::parse_str(uuid.trim())
            .map_err(|_| AppError::NotFound(format!("invitation {}", uuid)))?
            .to_string();

        let rows = self.store.get_all_rows(&self.sheet).await?;
        let (index, record) = find_by_uuid(self.layout, &rows, &id)?
            .ok_or_else(|| AppError::NotFound(format!("invitation {}", uuid)))?;
        Ok((index + 1, record))
    }
}

/// Wall-clock time in `tz`, in the short Russian format (`19.10.2026, 14:05`).
pub fn format_timestamp(now: DateTime<Utc>, tz: Tz) -> String {
    now.with_timezone(&tz).format("%d.%m.%Y, %H:%M").to_string()
}
