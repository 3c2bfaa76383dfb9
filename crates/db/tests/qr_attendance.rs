//! Integration tests for QR attendance sessions and daily upserts.

use campus_core::qr_attendance::{generate_session_token, session_expires_at};
use campus_db::models::campus::CreateCampus;
use campus_db::models::qr_attendance::{AttendanceMark, CreateQrAttendanceSession};
use campus_db::models::student::CreateStudent;
use campus_db::repositories::{CampusRepo, QrAttendanceRepo, StudentRepo};
use chrono::{Duration, Utc};
use sqlx::PgPool;

async fn seed_campus(pool: &PgPool, code: &str) -> i64 {
    CampusRepo::create(
        pool,
        &CreateCampus {
            name: format!("Campus {code}"),
            code: code.to_string(),
            address: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_student(pool: &PgPool, campus_id: i64, admission_no: &str) -> i64 {
    StudentRepo::create(
        pool,
        campus_id,
        &CreateStudent {
            campus_id: None,
            user_id: None,
            admission_no: admission_no.to_string(),
            first_name: "Asha".to_string(),
            last_name: None,
            class_name: Some("7".to_string()),
            section: Some("B".to_string()),
            roll_no: None,
            guardian_name: None,
            phone: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn new_session(campus_id: i64, minutes: Option<i64>) -> CreateQrAttendanceSession {
    CreateQrAttendanceSession {
        campus_id,
        token: generate_session_token(),
        attendance_type: "student".to_string(),
        expires_at: session_expires_at(Utc::now(), minutes),
        created_by: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_lookup_by_token(pool: PgPool) {
    let campus = seed_campus(&pool, "MAIN").await;
    let created = QrAttendanceRepo::create_session(&pool, &new_session(campus, None))
        .await
        .unwrap();

    let found = QrAttendanceRepo::find_session_by_token(&pool, &created.token)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.campus_id, campus);

    let missing = QrAttendanceRepo::find_session_by_token(&pool, "deadbeef")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_active_sessions_exclude_expired(pool: PgPool) {
    let campus = seed_campus(&pool, "MAIN").await;
    let live = QrAttendanceRepo::create_session(&pool, &new_session(campus, Some(10)))
        .await
        .unwrap();
    let mut stale = new_session(campus, None);
    stale.expires_at = Utc::now() - Duration::minutes(1);
    QrAttendanceRepo::create_session(&pool, &stale).await.unwrap();

    let active = QrAttendanceRepo::list_active_sessions(&pool, campus, Utc::now())
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, live.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_redeeming_twice_keeps_one_row(pool: PgPool) {
    let campus = seed_campus(&pool, "MAIN").await;
    let student = seed_student(&pool, campus, "ADM-1").await;
    let session = QrAttendanceRepo::create_session(&pool, &new_session(campus, None))
        .await
        .unwrap();
    let today = Utc::now().date_naive();

    let first = AttendanceMark {
        campus_id: campus,
        session_id: session.id,
        person_type: "student".to_string(),
        person_id: student,
        attendance_date: today,
        status: "Present".to_string(),
        check_in_time: Utc::now(),
    };
    let a = QrAttendanceRepo::mark_attendance(&pool, &first).await.unwrap();

    let second = AttendanceMark {
        status: "Late".to_string(),
        check_in_time: Utc::now() + Duration::seconds(30),
        ..first.clone()
    };
    let b = QrAttendanceRepo::mark_attendance(&pool, &second).await.unwrap();

    assert_eq!(a.id, b.id);
    assert_eq!(b.status, "Late");
    assert_eq!(
        QrAttendanceRepo::count_for_person(&pool, "student", student, today)
            .await
            .unwrap(),
        1
    );

    let mirrored: (i64, String) = sqlx::query_as(
        "SELECT COUNT(*) OVER (), status FROM student_attendance
         WHERE student_id = $1 AND attendance_date = $2",
    )
    .bind(student)
    .bind(today)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(mirrored, (1, "Late".to_string()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_records_listed_per_campus_and_day(pool: PgPool) {
    let north = seed_campus(&pool, "NORTH").await;
    let south = seed_campus(&pool, "SOUTH").await;
    let s1 = seed_student(&pool, north, "N-1").await;
    let s2 = seed_student(&pool, south, "S-1").await;
    let n_session = QrAttendanceRepo::create_session(&pool, &new_session(north, None))
        .await
        .unwrap();
    let s_session = QrAttendanceRepo::create_session(&pool, &new_session(south, None))
        .await
        .unwrap();
    let today = Utc::now().date_naive();

    for (campus_id, session_id, person_id) in [(north, n_session.id, s1), (south, s_session.id, s2)] {
        QrAttendanceRepo::mark_attendance(
            &pool,
            &AttendanceMark {
                campus_id,
                session_id,
                person_type: "student".to_string(),
                person_id,
                attendance_date: today,
                status: "Present".to_string(),
                check_in_time: Utc::now(),
            },
        )
        .await
        .unwrap();
    }

    let records = QrAttendanceRepo::list_records(&pool, north, today).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].person_id, s1);

    let yesterday = today - Duration::days(1);
    assert!(QrAttendanceRepo::list_records(&pool, north, yesterday)
        .await
        .unwrap()
        .is_empty());
}
