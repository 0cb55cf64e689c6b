use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::core::gpa::GpaSummary;
use crate::models::subject::CUSTOM_CODE_PREFIX;
use crate::models::{
    Comment, Folder, Post, Subject, TimetableEntry, TrimesterRecord, User,
};

pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

// ---- users & sessions ----

pub async fn insert_user(
    db: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let now = Utc::now().to_rfc3339();

    let result = sqlx::query(
        "INSERT INTO users (username, email, password_hash, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(&now)
    .execute(db)
    .await?;

    Ok(User {
        id: result.last_insert_rowid(),
        username: username.to_string(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        created_at: now,
    })
}

pub async fn find_user_by_email(db: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, email, password_hash, created_at FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(db)
    .await
}

pub async fn insert_session(db: &SqlitePool, user_id: i64) -> Result<String, sqlx::Error> {
    let token = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    sqlx::query("INSERT INTO sessions (token, user_id, created_at) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(user_id)
        .bind(&now)
        .execute(db)
        .await?;

    Ok(token)
}

pub async fn find_session_user(db: &SqlitePool, token: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.username, u.email, u.password_hash, u.created_at
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.token = ?
        "#,
    )
    .bind(token)
    .fetch_optional(db)
    .await
}

pub async fn delete_session(db: &SqlitePool, token: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ---- subjects ----

pub async fn fetch_subjects(db: &SqlitePool) -> Result<Vec<Subject>, sqlx::Error> {
    sqlx::query_as::<_, Subject>(
        "SELECT id, name, code, credit_hours FROM subjects ORDER BY code",
    )
    .fetch_all(db)
    .await
}

pub async fn find_subject_by_id(db: &SqlitePool, id: i64) -> Result<Option<Subject>, sqlx::Error> {
    sqlx::query_as::<_, Subject>("SELECT id, name, code, credit_hours FROM subjects WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Materializes a throwaway subject for a one-off timetable task. The code is
/// synthetic (timestamp-derived) so it can be recognized and collected later.
pub async fn insert_custom_subject(db: &SqlitePool, name: &str) -> Result<Subject, sqlx::Error> {
    let code = format!("{}{}", CUSTOM_CODE_PREFIX, Utc::now().timestamp_micros());

    let result = sqlx::query("INSERT INTO subjects (name, code, credit_hours) VALUES (?, ?, 3)")
        .bind(name)
        .bind(&code)
        .execute(db)
        .await?;

    Ok(Subject {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        code,
        credit_hours: 3,
    })
}

/// Deletes a custom subject once nothing references it anymore. Catalog
/// subjects (non-synthetic codes) are never touched, and neither is a custom
/// subject still referenced by any user's timetable.
pub async fn delete_subject_if_orphaned(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let pattern = format!("{}%", CUSTOM_CODE_PREFIX);
    let result = sqlx::query(
        r#"
        DELETE FROM subjects
        WHERE id = ?1
          AND code LIKE ?2
          AND NOT EXISTS (SELECT 1 FROM timetable_entries WHERE subject_id = ?1)
        "#,
    )
    .bind(id)
    .bind(pattern)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}

// ---- timetable ----

pub async fn fetch_timetable(db: &SqlitePool, user_id: i64) -> Result<Vec<TimetableEntry>, sqlx::Error> {
    sqlx::query_as::<_, TimetableEntry>(
        r#"
        SELECT id, user_id, day, time_slot, subject_id, task, created_at
        FROM timetable_entries
        WHERE user_id = ?
        ORDER BY day, time_slot
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn fetch_day_entries(
    db: &SqlitePool,
    user_id: i64,
    day: i64,
) -> Result<Vec<TimetableEntry>, sqlx::Error> {
    sqlx::query_as::<_, TimetableEntry>(
        r#"
        SELECT id, user_id, day, time_slot, subject_id, task, created_at
        FROM timetable_entries
        WHERE user_id = ? AND day = ?
        ORDER BY time_slot
        "#,
    )
    .bind(user_id)
    .bind(day)
    .fetch_all(db)
    .await
}

pub async fn insert_timetable_entry(
    db: &SqlitePool,
    user_id: i64,
    day: i64,
    time_slot: &str,
    subject_id: i64,
    task: Option<&str>,
) -> Result<TimetableEntry, sqlx::Error> {
    let now = Utc::now().to_rfc3339();

    let result = sqlx::query(
        r#"
        INSERT INTO timetable_entries (user_id, day, time_slot, subject_id, task, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(day)
    .bind(time_slot)
    .bind(subject_id)
    .bind(task)
    .bind(&now)
    .execute(db)
    .await?;

    Ok(TimetableEntry {
        id: result.last_insert_rowid(),
        user_id,
        day,
        time_slot: time_slot.to_string(),
        subject_id,
        task: task.map(str::to_string),
        created_at: now,
    })
}

pub async fn find_timetable_entry(
    db: &SqlitePool,
    id: i64,
) -> Result<Option<TimetableEntry>, sqlx::Error> {
    sqlx::query_as::<_, TimetableEntry>(
        "SELECT id, user_id, day, time_slot, subject_id, task, created_at FROM timetable_entries WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn delete_timetable_entry(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM timetable_entries WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ---- trimester records ----

pub async fn fetch_trimester_records(
    db: &SqlitePool,
    user_id: i64,
) -> Result<Vec<TrimesterRecord>, sqlx::Error> {
    sqlx::query_as::<_, TrimesterRecord>(
        r#"
        SELECT id, user_id, trimester, gpa, total_credits, total_grade_points, saved_at
        FROM trimester_records
        WHERE user_id = ?
        ORDER BY trimester
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn find_trimester_record(
    db: &SqlitePool,
    user_id: i64,
    trimester: &str,
) -> Result<Option<TrimesterRecord>, sqlx::Error> {
    sqlx::query_as::<_, TrimesterRecord>(
        r#"
        SELECT id, user_id, trimester, gpa, total_credits, total_grade_points, saved_at
        FROM trimester_records
        WHERE user_id = ? AND trimester = ?
        "#,
    )
    .bind(user_id)
    .bind(trimester)
    .fetch_optional(db)
    .await
}

/// Saving the same (user, trimester) twice overwrites the earlier record.
pub async fn upsert_trimester_record(
    db: &SqlitePool,
    user_id: i64,
    trimester: &str,
    summary: &GpaSummary,
) -> Result<TrimesterRecord, sqlx::Error> {
    let now = Utc::now().to_rfc3339();

    match find_trimester_record(db, user_id, trimester).await? {
        Some(existing) => {
            sqlx::query(
                r#"
                UPDATE trimester_records
                SET gpa = ?, total_credits = ?, total_grade_points = ?, saved_at = ?
                WHERE id = ?
                "#,
            )
            .bind(summary.gpa)
            .bind(summary.total_credits)
            .bind(summary.total_grade_points)
            .bind(&now)
            .bind(existing.id)
            .execute(db)
            .await?;

            Ok(TrimesterRecord {
                gpa: summary.gpa,
                total_credits: summary.total_credits,
                total_grade_points: summary.total_grade_points,
                saved_at: now,
                ..existing
            })
        }
        None => {
            let result = sqlx::query(
                r#"
                INSERT INTO trimester_records
                    (user_id, trimester, gpa, total_credits, total_grade_points, saved_at)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(user_id)
            .bind(trimester)
            .bind(summary.gpa)
            .bind(summary.total_credits)
            .bind(summary.total_grade_points)
            .bind(&now)
            .execute(db)
            .await?;

            Ok(TrimesterRecord {
                id: result.last_insert_rowid(),
                user_id,
                trimester: trimester.to_string(),
                gpa: summary.gpa,
                total_credits: summary.total_credits,
                total_grade_points: summary.total_grade_points,
                saved_at: now,
            })
        }
    }
}

pub async fn delete_trimester_record(
    db: &SqlitePool,
    user_id: i64,
    id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM trimester_records WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_all_trimester_records(
    db: &SqlitePool,
    user_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM trimester_records WHERE user_id = ?")
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

// ---- feed ----

const POST_COLUMNS: &str = r#"
    p.id, p.user_id, u.username AS author, p.content, p.created_at,
    (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count
"#;

pub async fn fetch_posts(db: &SqlitePool) -> Result<Vec<Post>, sqlx::Error> {
    let sql = format!(
        "SELECT {POST_COLUMNS} FROM posts p JOIN users u ON u.id = p.user_id ORDER BY p.created_at DESC"
    );
    sqlx::query_as::<_, Post>(&sql).fetch_all(db).await
}

pub async fn find_post(db: &SqlitePool, id: &str) -> Result<Option<Post>, sqlx::Error> {
    let sql = format!(
        "SELECT {POST_COLUMNS} FROM posts p JOIN users u ON u.id = p.user_id WHERE p.id = ?"
    );
    sqlx::query_as::<_, Post>(&sql).bind(id).fetch_optional(db).await
}

pub async fn insert_post(db: &SqlitePool, user: &User, content: &str) -> Result<Post, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    sqlx::query("INSERT INTO posts (id, user_id, content, created_at) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(user.id)
        .bind(content)
        .bind(&now)
        .execute(db)
        .await?;

    Ok(Post {
        id,
        user_id: user.id,
        author: user.username.clone(),
        content: content.to_string(),
        created_at: now,
        comment_count: 0,
    })
}

/// Removes a post together with its comments and folder references. Scoped to
/// the owning user; returns false when the post is absent or owned by someone
/// else.
pub async fn delete_post(db: &SqlitePool, user_id: i64, id: &str) -> Result<bool, sqlx::Error> {
    let mut tx = db.begin().await?;

    let owned = sqlx::query("SELECT 1 FROM posts WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .is_some();
    if !owned {
        return Ok(false);
    }

    sqlx::query("DELETE FROM comments WHERE post_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM folder_posts WHERE post_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(true)
}

pub async fn fetch_comments(db: &SqlitePool, post_id: &str) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT c.id, c.post_id, c.user_id, u.username AS author, c.content, c.created_at
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.post_id = ?
        ORDER BY c.created_at
        "#,
    )
    .bind(post_id)
    .fetch_all(db)
    .await
}

pub async fn insert_comment(
    db: &SqlitePool,
    post_id: &str,
    user: &User,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    sqlx::query(
        "INSERT INTO comments (id, post_id, user_id, content, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(post_id)
    .bind(user.id)
    .bind(content)
    .bind(&now)
    .execute(db)
    .await?;

    Ok(Comment {
        id,
        post_id: post_id.to_string(),
        user_id: user.id,
        author: user.username.clone(),
        content: content.to_string(),
        created_at: now,
    })
}

// ---- folders ----

pub async fn fetch_folders(db: &SqlitePool, user_id: i64) -> Result<Vec<Folder>, sqlx::Error> {
    sqlx::query_as::<_, Folder>(
        "SELECT id, user_id, name FROM folders WHERE user_id = ? ORDER BY name",
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn find_folder(
    db: &SqlitePool,
    user_id: i64,
    id: i64,
) -> Result<Option<Folder>, sqlx::Error> {
    sqlx::query_as::<_, Folder>("SELECT id, user_id, name FROM folders WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await
}

pub async fn insert_folder(
    db: &SqlitePool,
    user_id: i64,
    name: &str,
) -> Result<Folder, sqlx::Error> {
    let result = sqlx::query("INSERT INTO folders (user_id, name) VALUES (?, ?)")
        .bind(user_id)
        .bind(name)
        .execute(db)
        .await?;

    Ok(Folder {
        id: result.last_insert_rowid(),
        user_id,
        name: name.to_string(),
    })
}

pub async fn delete_folder(db: &SqlitePool, user_id: i64, id: i64) -> Result<bool, sqlx::Error> {
    let mut tx = db.begin().await?;

    let owned = sqlx::query("SELECT 1 FROM folders WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .is_some();
    if !owned {
        return Ok(false);
    }

    sqlx::query("DELETE FROM folder_posts WHERE folder_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM folders WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(true)
}

pub async fn save_post_to_folder(
    db: &SqlitePool,
    folder_id: i64,
    post_id: &str,
) -> Result<(), sqlx::Error> {
    let now = Utc::now().to_rfc3339();
    sqlx::query("INSERT INTO folder_posts (folder_id, post_id, saved_at) VALUES (?, ?, ?)")
        .bind(folder_id)
        .bind(post_id)
        .bind(&now)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn fetch_folder_posts(db: &SqlitePool, folder_id: i64) -> Result<Vec<Post>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM folder_posts fp
        JOIN posts p ON p.id = fp.post_id
        JOIN users u ON u.id = p.user_id
        WHERE fp.folder_id = ?
        ORDER BY fp.saved_at DESC
        "#
    );
    sqlx::query_as::<_, Post>(&sql).bind(folder_id).fetch_all(db).await
}

pub async fn remove_post_from_folder(
    db: &SqlitePool,
    folder_id: i64,
    post_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM folder_posts WHERE folder_id = ? AND post_id = ?")
        .bind(folder_id)
        .bind(post_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test db");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    async fn test_user(pool: &SqlitePool) -> User {
        insert_user(pool, "jiaxian", "jiaxian@example.com", "digest")
            .await
            .expect("Failed to insert user")
    }

    #[tokio::test]
    async fn test_insert_user_and_lookup() {
        let pool = setup_test_db().await;
        let user = test_user(&pool).await;

        let found = find_user_by_email(&pool, "jiaxian@example.com")
            .await
            .expect("Failed to query user")
            .expect("User not found");
        assert_eq!(found.id, user.id);
        assert_eq!(found.username, "jiaxian");
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let pool = setup_test_db().await;
        test_user(&pool).await;

        let err = insert_user(&pool, "other", "jiaxian@example.com", "digest")
            .await
            .expect_err("Duplicate email should fail");
        assert!(is_unique_violation(&err));
    }

    #[tokio::test]
    async fn test_session_roundtrip() {
        let pool = setup_test_db().await;
        let user = test_user(&pool).await;

        let token = insert_session(&pool, user.id).await.expect("Failed to insert session");
        let found = find_session_user(&pool, &token)
            .await
            .expect("Failed to query session")
            .expect("Session not found");
        assert_eq!(found.id, user.id);

        assert!(delete_session(&pool, &token).await.expect("Failed to delete session"));
        assert!(
            find_session_user(&pool, &token)
                .await
                .expect("Failed to query session")
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_subject_catalog_is_seeded_in_code_order() {
        let pool = setup_test_db().await;

        let subjects = fetch_subjects(&pool).await.expect("Failed to fetch subjects");
        assert_eq!(subjects.len(), 14);
        assert_eq!(subjects[0].code, "CCT1114");
        assert!(subjects.windows(2).all(|w| w[0].code < w[1].code));
    }

    #[tokio::test]
    async fn test_duplicate_slot_is_rejected_and_first_entry_kept() {
        let pool = setup_test_db().await;
        let user = test_user(&pool).await;

        let first = insert_timetable_entry(&pool, user.id, 2, "9:00 AM - 10:00 AM", 1, Some("lecture"))
            .await
            .expect("First insert should succeed");

        let err = insert_timetable_entry(&pool, user.id, 2, "9:00 AM - 10:00 AM", 2, None)
            .await
            .expect_err("Duplicate slot should fail");
        assert!(is_unique_violation(&err));

        let entries = fetch_day_entries(&pool, user.id, 2).await.expect("Failed to fetch entries");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, first.id);
        assert_eq!(entries[0].task.as_deref(), Some("lecture"));
    }

    #[tokio::test]
    async fn test_custom_subject_collected_only_when_unreferenced() {
        let pool = setup_test_db().await;
        let user = test_user(&pool).await;

        let custom = insert_custom_subject(&pool, "Club practice").await.expect("Failed to insert subject");
        assert!(custom.is_custom());

        let entry = insert_timetable_entry(&pool, user.id, 4, "5:00 PM - 6:00 PM", custom.id, None)
            .await
            .expect("Failed to insert entry");

        // still referenced, must survive
        assert!(!delete_subject_if_orphaned(&pool, custom.id).await.expect("Failed to collect"));
        assert!(find_subject_by_id(&pool, custom.id).await.expect("query").is_some());

        assert!(delete_timetable_entry(&pool, entry.id).await.expect("Failed to delete entry"));
        assert!(delete_subject_if_orphaned(&pool, custom.id).await.expect("Failed to collect"));
        assert!(find_subject_by_id(&pool, custom.id).await.expect("query").is_none());
    }

    #[tokio::test]
    async fn test_catalog_subject_never_collected() {
        let pool = setup_test_db().await;

        assert!(!delete_subject_if_orphaned(&pool, 1).await.expect("Failed to collect"));
        assert!(find_subject_by_id(&pool, 1).await.expect("query").is_some());
    }

    #[tokio::test]
    async fn test_trimester_record_upsert_overwrites() {
        let pool = setup_test_db().await;
        let user = test_user(&pool).await;

        let first = GpaSummary {
            gpa: 3.0,
            total_credits: 10,
            total_grade_points: 30.0,
            graded_count: 3,
            ungraded_count: 0,
        };
        let created = upsert_trimester_record(&pool, user.id, "Trimester 1", &first)
            .await
            .expect("Failed to insert record");

        let second = GpaSummary {
            gpa: 3.5,
            total_credits: 12,
            total_grade_points: 42.0,
            graded_count: 4,
            ungraded_count: 0,
        };
        let updated = upsert_trimester_record(&pool, user.id, "Trimester 1", &second)
            .await
            .expect("Failed to update record");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.total_credits, 12);

        let records = fetch_trimester_records(&pool, user.id).await.expect("Failed to fetch records");
        assert_eq!(records.len(), 1);
        assert!((records[0].gpa - 3.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_delete_post_cascades_comments_and_saves() {
        let pool = setup_test_db().await;
        let user = test_user(&pool).await;

        let post = insert_post(&pool, &user, "hello campus").await.expect("Failed to insert post");
        insert_comment(&pool, &post.id, &user, "first!").await.expect("Failed to insert comment");
        let folder = insert_folder(&pool, user.id, "Saved").await.expect("Failed to insert folder");
        save_post_to_folder(&pool, folder.id, &post.id).await.expect("Failed to save post");

        // another user cannot delete it
        assert!(!delete_post(&pool, user.id + 1, &post.id).await.expect("Failed to delete"));

        assert!(delete_post(&pool, user.id, &post.id).await.expect("Failed to delete"));
        assert!(find_post(&pool, &post.id).await.expect("query").is_none());
        assert!(fetch_comments(&pool, &post.id).await.expect("query").is_empty());
        assert!(fetch_folder_posts(&pool, folder.id).await.expect("query").is_empty());
    }

    #[tokio::test]
    async fn test_comment_count_follows_comments() {
        let pool = setup_test_db().await;
        let user = test_user(&pool).await;

        let post = insert_post(&pool, &user, "anyone up for study group?")
            .await
            .expect("Failed to insert post");
        assert_eq!(post.comment_count, 0);

        insert_comment(&pool, &post.id, &user, "me").await.expect("Failed to insert comment");
        insert_comment(&pool, &post.id, &user, "same").await.expect("Failed to insert comment");

        let fetched = find_post(&pool, &post.id)
            .await
            .expect("query")
            .expect("Post not found");
        assert_eq!(fetched.comment_count, 2);
        assert_eq!(fetched.author, "jiaxian");
    }
}
