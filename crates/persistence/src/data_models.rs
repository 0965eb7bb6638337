// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use muster_domain::{
    Member, MemberCategory, MemberId, MembershipOrigin, ParticipationStatus, Shift, ShiftId,
    ShiftMembership, ShiftStatus,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::diesel_schema::{members, shift_memberships, shifts};
use crate::error::PersistenceError;

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

/// Input for creating a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub display_name: String,
    pub avatar: Option<String>,
    pub category: MemberCategory,
    pub is_operator: bool,
}

/// Input for creating a shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShift {
    pub title: String,
    pub location: String,
    pub starts_at: OffsetDateTime,
    pub ends_at: OffsetDateTime,
    pub vacancies: u32,
}

/// Timestamps are stored as Unix nanoseconds so they read back exactly.
pub(crate) fn to_unix_nanos(instant: OffsetDateTime) -> Result<i64, PersistenceError> {
    i64::try_from(instant.unix_timestamp_nanos())
        .map_err(|_| PersistenceError::QueryFailed(format!("Timestamp {instant} out of range")))
}

pub(crate) fn from_unix_nanos(nanos: i64) -> Result<OffsetDateTime, PersistenceError> {
    Ok(OffsetDateTime::from_unix_timestamp_nanos(i128::from(nanos))?)
}

pub(crate) fn to_count(value: u32) -> Result<i32, PersistenceError> {
    i32::try_from(value)
        .map_err(|_| PersistenceError::QueryFailed(format!("Count {value} out of range")))
}

fn from_count(value: i32) -> Result<u32, PersistenceError> {
    u32::try_from(value)
        .map_err(|_| PersistenceError::ReconstructionError(format!("Negative count {value}")))
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = members)]
pub(crate) struct MemberRow {
    member_id: i64,
    display_name: String,
    avatar_url: Option<String>,
    category: String,
    is_active: i32,
    is_operator: i32,
    shifts_count: i32,
    last_shift_date: Option<i64>,
}

impl TryFrom<MemberRow> for Member {
    type Error = PersistenceError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MemberId::new(row.member_id),
            display_name: row.display_name,
            avatar: row.avatar_url,
            category: row.category.parse()?,
            active: row.is_active != 0,
            is_operator: row.is_operator != 0,
            shifts_count: from_count(row.shifts_count)?,
            last_shift_date: row.last_shift_date.map(from_unix_nanos).transpose()?,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = shifts)]
pub(crate) struct ShiftRow {
    pub(crate) shift_id: i64,
    title: String,
    location: String,
    starts_at: i64,
    ends_at: i64,
    vacancies: i32,
    status: String,
    pub(crate) version: i64,
}

impl ShiftRow {
    /// Builds the shift around an already loaded membership list.
    pub(crate) fn into_shift(
        self,
        members: Vec<ShiftMembership>,
    ) -> Result<(Shift, i64), PersistenceError> {
        let status: ShiftStatus = self.status.parse()?;
        let shift = Shift {
            id: ShiftId::new(self.shift_id),
            title: self.title,
            location: self.location,
            starts_at: from_unix_nanos(self.starts_at)?,
            ends_at: from_unix_nanos(self.ends_at)?,
            vacancies: from_count(self.vacancies)?,
            status,
            members,
        };
        Ok((shift, self.version))
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = shift_memberships)]
pub(crate) struct MembershipRow {
    member_id: i64,
    member_name: String,
    avatar_url: Option<String>,
    origin: String,
    participation_status: String,
    joined_at: i64,
    confirmed_at: Option<i64>,
}

impl TryFrom<MembershipRow> for ShiftMembership {
    type Error = PersistenceError;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        let origin: MembershipOrigin = row.origin.parse()?;
        let participation_status: ParticipationStatus = row.participation_status.parse()?;
        Ok(Self {
            member_id: MemberId::new(row.member_id),
            member_name: row.member_name,
            avatar: row.avatar_url,
            origin,
            participation_status,
            joined_at: from_unix_nanos(row.joined_at)?,
            confirmed_at: row.confirmed_at.map(from_unix_nanos).transpose()?,
        })
    }
}
