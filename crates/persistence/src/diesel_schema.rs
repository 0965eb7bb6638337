// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    audit_events (event_id) {
        event_id -> BigInt,
        shift_id -> BigInt,
        actor_json -> Text,
        cause_json -> Text,
        action_json -> Text,
        before_snapshot_json -> Text,
        after_snapshot_json -> Text,
        recorded_at -> BigInt,
    }
}

diesel::table! {
    members (member_id) {
        member_id -> BigInt,
        display_name -> Text,
        avatar_url -> Nullable<Text>,
        category -> Text,
        is_active -> Integer,
        is_operator -> Integer,
        shifts_count -> Integer,
        last_shift_date -> Nullable<BigInt>,
    }
}

diesel::table! {
    shift_memberships (membership_id) {
        membership_id -> BigInt,
        shift_id -> BigInt,
        member_id -> BigInt,
        member_name -> Text,
        avatar_url -> Nullable<Text>,
        origin -> Text,
        participation_status -> Text,
        joined_at -> BigInt,
        confirmed_at -> Nullable<BigInt>,
        position -> Integer,
    }
}

diesel::table! {
    shifts (shift_id) {
        shift_id -> BigInt,
        title -> Text,
        location -> Text,
        starts_at -> BigInt,
        ends_at -> BigInt,
        vacancies -> Integer,
        status -> Text,
        version -> BigInt,
        finalized_at -> Nullable<BigInt>,
    }
}

diesel::joinable!(audit_events -> shifts (shift_id));
diesel::joinable!(shift_memberships -> members (member_id));
diesel::joinable!(shift_memberships -> shifts (shift_id));

diesel::allow_tables_to_appear_in_same_query!(audit_events, members, shift_memberships, shifts,);
