//! Tests the pre-persist checks the admin calendar runs: overlap
//! detection per resource, client double-booking, weekly-hours verdicts
//! and the atomic booking step.

use appointment_book::booking::{
    AppointmentId, BookError, BookingRequest, ClientId, ResourceId, ResourceKind, ScheduleVerdict,
    TenantId, WeeklySchedule,
};
use appointment_book::time::{TimeStamp, WeekDay, WorkingDuration};
use appointment_book::{check_booking, date, time_stamp, working_duration};

use pretty_assertions::assert_eq;

mod common;

fn candidate(time: TimeStamp, duration: WorkingDuration) -> BookingRequest {
    BookingRequest::new(common::TENANT, date!(2026:03:17), time, duration)
}

#[test]
fn test_free_candidate_passes_every_check() {
    let store = common::salon_store();

    let request = candidate(time_stamp!(12:30), working_duration!(00:30))
        .with_employee(ResourceId::new(5));
    let check = check_booking(&store, &request).expect("check should run");

    assert_eq!(check.resource_conflict, None);
    assert_eq!(check.client_conflict, None);
    assert_eq!(check.employee_hours, Some(ScheduleVerdict::Within));
    assert_eq!(check.doctor_hours, None);
    assert!(check.is_bookable());
}

#[test]
fn test_overlapping_candidate_reports_the_blocking_appointment() {
    let store = common::salon_store();

    let request = candidate(time_stamp!(10:00), working_duration!(01:00))
        .with_employee(ResourceId::new(5));
    let check = check_booking(&store, &request).expect("check should run");

    let conflict = check.resource_conflict.as_ref().expect("expected a conflict");
    assert_eq!(conflict.kind(), ResourceKind::Employee);
    assert_eq!(conflict.time(), time_stamp!(09:00));
    assert_eq!(conflict.duration(), working_duration!(01:30));
    assert_eq!(conflict.client_name(), Some("Anna Schmidt"));
    assert_eq!(
        conflict.to_string(),
        "employee is already booked 09:00 - 10:30 (Anna Schmidt, Haircut)"
    );
    assert!(!check.is_bookable());
}

#[test]
fn test_touching_appointments_are_legal() {
    let store = common::salon_store();

    // starts exactly when the 09:00 haircut ends
    let request = candidate(time_stamp!(10:30), working_duration!(01:30))
        .with_employee(ResourceId::new(5));
    let check = check_booking(&store, &request).expect("check should run");

    assert!(check.is_bookable());
}

#[test]
fn test_editing_an_appointment_skips_itself() {
    let store = common::salon_store();

    let same_time = candidate(time_stamp!(09:00), working_duration!(01:30))
        .with_employee(ResourceId::new(5));
    assert!(!check_booking(&store, &same_time)
        .expect("check should run")
        .is_bookable());

    let edit = same_time.excluding(AppointmentId::new(1));
    assert!(check_booking(&store, &edit)
        .expect("check should run")
        .is_bookable());
}

#[test]
fn test_cancelled_slot_is_free_again() {
    let store = common::salon_store();

    // 14:00 - 15:00 is only held by a cancelled appointment
    let request = candidate(time_stamp!(14:00), working_duration!(01:00))
        .with_employee(ResourceId::new(5));

    assert!(check_booking(&store, &request)
        .expect("check should run")
        .is_bookable());
}

#[test]
fn test_label_and_id_name_the_same_employee() {
    let store = common::salon_store();

    // the 16:00 row only stored the label, the request uses the id
    let by_id = candidate(time_stamp!(16:00), working_duration!(00:30))
        .with_employee(ResourceId::new(5));
    assert!(!check_booking(&store, &by_id)
        .expect("check should run")
        .is_bookable());

    // and the other way around: a label request against an id row
    let by_label = candidate(time_stamp!(09:30), working_duration!(00:30))
        .with_employee_label("Dana Weber");
    let check = check_booking(&store, &by_label).expect("check should run");

    assert!(check.resource_conflict.is_some());
    // label references can have no schedule rows, so hours check as within
    assert_eq!(check.employee_hours, Some(ScheduleVerdict::Within));
}

#[test]
fn test_client_cannot_double_book_across_resources() {
    let store = common::salon_store();

    // the doctor is free at 09:30, but client 9 is in the middle of a
    // haircut with an employee
    let request = candidate(time_stamp!(09:30), working_duration!(00:30))
        .with_doctor(ResourceId::new(2))
        .with_client(ClientId::new(9));
    let check = check_booking(&store, &request).expect("check should run");

    assert_eq!(check.resource_conflict, None);
    let conflict = check.client_conflict.as_ref().expect("expected a client conflict");
    assert_eq!(
        conflict.to_string(),
        "client already has an appointment 09:00 - 10:30 (Haircut)"
    );
    assert!(!check.is_bookable());

    // another client at the same time is fine
    let other = candidate(time_stamp!(09:30), working_duration!(00:30))
        .with_doctor(ResourceId::new(2))
        .with_client(ClientId::new(11));
    assert!(check_booking(&store, &other)
        .expect("check should run")
        .is_bookable());
}

#[test]
fn test_other_tenants_stay_invisible() {
    let store = common::salon_store();

    // tenant 1 has a 16:00 booking for this employee, tenant 2 does not
    let request = BookingRequest::new(
        TenantId::new(2),
        date!(2026:03:17),
        time_stamp!(16:00),
        working_duration!(00:30),
    )
    .with_employee(ResourceId::new(5));
    assert!(check_booking(&store, &request)
        .expect("check should run")
        .is_bookable());

    // tenant 2 is blocked by its own rows only
    let own = BookingRequest::new(
        TenantId::new(2),
        date!(2026:03:17),
        time_stamp!(09:30),
        working_duration!(00:30),
    )
    .with_employee(ResourceId::new(5));
    assert!(!check_booking(&store, &own)
        .expect("check should run")
        .is_bookable());
}

#[test]
fn test_weekly_hours_only_warn_when_the_time_is_free() {
    let store = common::salon_store();
    store
        .upsert_schedule(
            ResourceKind::Employee,
            WeeklySchedule::new(
                common::TENANT,
                ResourceId::new(5),
                WeekDay::Tuesday,
                time_stamp!(10:00),
                time_stamp!(18:00),
                true,
            ),
        )
        .expect("upsert should succeed");

    // a free Tuesday one week later, half an hour before the shift starts
    let request = BookingRequest::new(
        common::TENANT,
        date!(2026:03:24),
        time_stamp!(09:30),
        working_duration!(00:30),
    )
    .with_employee(ResourceId::new(5));
    let check = check_booking(&store, &request).expect("check should run");

    assert_eq!(check.resource_conflict, None);
    assert_eq!(
        check.employee_hours,
        Some(ScheduleVerdict::Outside {
            start: time_stamp!(10:00),
            end: time_stamp!(18:00),
        })
    );
    assert!(!check.is_bookable());

    let json = serde_json::to_value(&check).expect("check should serialize");
    assert_eq!(json["employee_hours"]["verdict"], "outside");
    assert_eq!(json["employee_hours"]["start"], "10:00");

    // half an hour later everything is fine
    let inside = BookingRequest::new(
        common::TENANT,
        date!(2026:03:24),
        time_stamp!(10:00),
        working_duration!(00:30),
    )
    .with_employee(ResourceId::new(5));
    assert!(check_booking(&store, &inside)
        .expect("check should run")
        .is_bookable());
}

#[test]
fn test_doctor_hours_are_checked_independently() {
    let store = common::salon_store();
    store
        .upsert_schedule(
            ResourceKind::Doctor,
            WeeklySchedule::new(
                common::TENANT,
                ResourceId::new(2),
                WeekDay::Tuesday,
                time_stamp!(08:00),
                time_stamp!(12:00),
                true,
            ),
        )
        .expect("upsert should succeed");

    // free time, but after the doctor's shift
    let late = candidate(time_stamp!(12:30), working_duration!(00:30))
        .with_doctor(ResourceId::new(2));
    let check = check_booking(&store, &late).expect("check should run");
    assert_eq!(check.resource_conflict, None);
    assert_eq!(
        check.doctor_hours,
        Some(ScheduleVerdict::Outside {
            start: time_stamp!(08:00),
            end: time_stamp!(12:00),
        })
    );
    assert_eq!(check.employee_hours, None);

    // inside the shift and free
    let inside = candidate(time_stamp!(10:00), working_duration!(00:30))
        .with_doctor(ResourceId::new(2));
    assert!(check_booking(&store, &inside)
        .expect("check should run")
        .is_bookable());
}

#[test]
fn test_a_passed_check_can_still_lose_the_race() {
    let store = common::salon_store();

    let request = candidate(time_stamp!(13:00), working_duration!(01:00))
        .with_employee(ResourceId::new(6));
    assert!(check_booking(&store, &request)
        .expect("check should run")
        .is_bookable());

    // another request for the same employee persists first
    let rival = candidate(time_stamp!(13:30), working_duration!(01:00))
        .with_employee(ResourceId::new(6));
    let booked = store
        .try_book(&rival, Some("Lena Vogt"), Some("Coloring"))
        .expect("the rival should win the slot");

    // the earlier check is now stale and the guarded insert catches it
    let denied = store.try_book(&request, None, None);
    assert!(
        matches!(denied, Err(BookError::Taken { with }) if with == booked.id()),
        "expected the stale booking to be denied"
    );
}
