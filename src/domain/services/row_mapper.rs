//! Translation between [`InvitationRecord`] and the positional rows of the
//! spreadsheet.
//!
//! Each [`SheetLayout`] fixes a column order. Layouts are not compatible with
//! each other: a sheet is created for one layout and stays on it.

use std::str::FromStr;

use crate::domain::models::invitation::{InvitationRecord, InvitationStatus};
use crate::domain::services::messages::{ATTENDING_TEXT, NOT_ATTENDING_TEXT};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetLayout {
    /// timestamp, attendance text, name, guest, message
    Responses,
    /// status, timestamp, admin name, admin comment, name, guest, message, uuid, link
    Invitations,
}

impl SheetLayout {
    pub fn uuid_column(&self) -> Option<usize> {
        match self {
            SheetLayout::Responses => None,
            SheetLayout::Invitations => Some(7),
        }
    }
}

impl FromStr for SheetLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "responses" => Ok(SheetLayout::Responses),
            "invitations" => Ok(SheetLayout::Invitations),
            other => Err(format!("unknown sheet layout '{}'", other)),
        }
    }
}

pub fn to_row(layout: SheetLayout, record: &InvitationRecord) -> Vec<String> {
    match layout {
        SheetLayout::Responses => vec![
            record.timestamp.clone(),
            attendance_text(record.status).to_string(),
            record.user_name.clone(),
            record.guest.clone(),
            record.message.clone(),
        ],
        SheetLayout::Invitations => vec![
            record.status.as_str().to_string(),
            record.timestamp.clone(),
            record.admin_name.clone(),
            record.admin_comment.clone(),
            record.user_name.clone(),
            record.guest.clone(),
            record.message.clone(),
            record.uuid.clone(),
            record.invite_link.clone(),
        ],
    }
}

pub fn from_row(layout: SheetLayout, row: &[String]) -> Result<InvitationRecord, AppError> {
    let cell = |i: usize| row.get(i).map(|s| s.trim().to_string()).unwrap_or_default();

    match layout {
        SheetLayout::Responses => Ok(InvitationRecord {
            status: status_from_attendance_text(&cell(1)),
            timestamp: cell(0),
            admin_name: String::new(),
            admin_comment: String::new(),
            user_name: cell(2),
            guest: cell(3),
            message: cell(4),
            uuid: String::new(),
            invite_link: String::new(),
        }),
        SheetLayout::Invitations => {
            let status = InvitationStatus::from_str(&cell(0))
                .map_err(|e| AppError::Upstream(format!("Malformed sheet row: {}", e)))?;

            Ok(InvitationRecord {
                status,
                timestamp: cell(1),
                admin_name: cell(2),
                admin_comment: cell(3),
                user_name: cell(4),
                guest: cell(5),
                message: cell(6),
                uuid: cell(7),
                invite_link: cell(8),
            })
        }
    }
}

/// Position (0-based, within `rows`) and contents of the row carrying `uuid`.
pub fn find_by_uuid(
    layout: SheetLayout,
    rows: &[Vec<String>],
    uuid: &str,
) -> Result<Option<(usize, InvitationRecord)>, AppError> {
    let Some(column) = layout.uuid_column() else {
        return Ok(None);
    };
    let target = uuid.trim();
    if target.is_empty() {
        return Ok(None);
    }

    match rows.iter().position(|row| row.get(column).is_some_and(|c| c.trim().eq_ignore_ascii_case(target))) {
        Some(index) => from_row(layout, &rows[index]).map(|record| Some((index, record))),
        None => Ok(None),
    }
}

/// A1 column letters for a 1-based column number.
pub fn column_letter(mut column: usize) -> String {
    let mut letters = Vec::new();
    while column > 0 {
        let rem = (column - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        column = (column - 1) / 26;
    }
    letters.iter().rev().collect()
}

fn attendance_text(status: InvitationStatus) -> &'static str {
    match status {
        InvitationStatus::Declined => NOT_ATTENDING_TEXT,
        _ => ATTENDING_TEXT,
    }
}

fn status_from_attendance_text(text: &str) -> InvitationStatus {
    match text {
        ATTENDING_TEXT => InvitationStatus::Accepted,
        NOT_ATTENDING_TEXT => InvitationStatus::Declined,
        _ => InvitationStatus::Created,
    }
}
