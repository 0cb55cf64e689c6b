use axum::Json;
use axum::extract::Path;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::routing::{delete, post, put};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::core::gpa::{self, GpaSummary};
use crate::core::timeslot;
use crate::db::repository;
use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/subjects", get(list_subjects))
        .route("/timetable", get(list_timetable).post(add_timetable_entry))
        .route("/timetable/{id}", delete(remove_timetable_entry))
        .route("/gpa/calculator", get(calculator_state))
        .route("/gpa/calculator/subjects", post(add_calculator_subject))
        .route(
            "/gpa/calculator/subjects/{index}",
            put(set_subject_grade).delete(remove_calculator_subject),
        )
        .route("/gpa/calculator/save", post(save_trimester))
        .route("/gpa/history", get(gpa_history).delete(clear_gpa_history))
        .route("/gpa/history/{id}", delete(remove_trimester_record))
        .route("/feed", get(list_posts).post(create_post))
        .route("/feed/{id}", delete(remove_post))
        .route("/feed/{id}/comments", get(list_comments).post(create_comment))
        .route("/folders", get(list_folders).post(create_folder))
        .route("/folders/{id}", delete(remove_folder))
        .route("/folders/{id}/posts", get(list_folder_posts).post(save_post))
        .route("/folders/{id}/posts/{post_id}", delete(unsave_post))
        .with_state(state)
}

fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)
}

async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<User, AppError> {
    let token = bearer_token(headers)?;
    repository::find_session_user(&state.db, token)
        .await?
        .ok_or(AppError::Unauthorized)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

// ---- auth ----

#[derive(Serialize)]
struct SessionResponse {
    token: String,
    user: User,
}

async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let username = req.username.trim();
    let email = req.email.trim();
    if username.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "username, email and password are required".to_string(),
        ));
    }

    let user = repository::insert_user(&state.db, username, email, &hash_password(&req.password))
        .await
        .map_err(|err| {
            if repository::is_unique_violation(&err) {
                AppError::Conflict("username or email is already registered".to_string())
            } else {
                err.into()
            }
        })?;

    info!("registered user {}", user.username);
    Ok((StatusCode::CREATED, Json(user)))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let user = repository::find_user_by_email(&state.db, req.email.trim())
        .await?
        .filter(|user| user.password_hash == hash_password(&req.password))
        .ok_or(AppError::Unauthorized)?;

    let token = repository::insert_session(&state.db, user.id).await?;
    Ok(Json(SessionResponse { token, user }))
}

async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let token = bearer_token(&headers)?;
    if repository::delete_session(&state.db, token).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Unauthorized)
    }
}

// ---- subjects & timetable ----

async fn list_subjects(State(state): State<AppState>) -> Result<Json<Vec<Subject>>, AppError> {
    let subjects = repository::fetch_subjects(&state.db).await?;
    Ok(Json(subjects))
}

async fn list_timetable(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<TimetableEntry>>, AppError> {
    let user = authenticate(&state, &headers).await?;
    let entries = repository::fetch_timetable(&state.db, user.id).await?;
    Ok(Json(entries))
}

async fn add_timetable_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<NewTimetableEntryRequest>,
) -> Result<Json<TimetableEntry>, AppError> {
    let user = authenticate(&state, &headers).await?;

    if !(0..=6).contains(&req.day) {
        return Err(AppError::BadRequest("day must be between 0 and 6".to_string()));
    }
    if !timeslot::is_valid_range(&req.start_time, &req.end_time) {
        return Err(AppError::BadRequest(
            "end time must be later than start time".to_string(),
        ));
    }

    let slot = timeslot::format_slot(&req.start_time, &req.end_time);
    let existing = repository::fetch_day_entries(&state.db, user.id, req.day).await?;
    if timeslot::slot_conflicts(user.id, req.day, &slot, &existing) {
        return Err(AppError::Conflict(format!("slot {slot} is already taken on that day")));
    }

    let subject = match (req.subject_id, req.custom_name.as_deref()) {
        (Some(id), _) => repository::find_subject_by_id(&state.db, id)
            .await?
            .ok_or_else(|| AppError::BadRequest("unknown subject".to_string()))?,
        (None, Some(name)) if !name.trim().is_empty() => {
            repository::insert_custom_subject(&state.db, name.trim()).await?
        }
        _ => {
            return Err(AppError::BadRequest(
                "either subject_id or custom_name is required".to_string(),
            ));
        }
    };

    match repository::insert_timetable_entry(
        &state.db,
        user.id,
        req.day,
        &slot,
        subject.id,
        req.task.as_deref(),
    )
    .await
    {
        Ok(entry) => Ok(Json(entry)),
        Err(err) if repository::is_unique_violation(&err) => {
            // lost a race for the slot; do not leak a just-made custom subject
            repository::delete_subject_if_orphaned(&state.db, subject.id).await?;
            Err(AppError::Conflict(format!("slot {slot} is already taken on that day")))
        }
        Err(err) => Err(err.into()),
    }
}

async fn remove_timetable_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let user = authenticate(&state, &headers).await?;

    let entry = repository::find_timetable_entry(&state.db, id)
        .await?
        .filter(|entry| entry.user_id == user.id)
        .ok_or(AppError::NotFound)?;

    repository::delete_timetable_entry(&state.db, entry.id).await?;
    if repository::delete_subject_if_orphaned(&state.db, entry.subject_id).await? {
        debug!("collected custom subject {}", entry.subject_id);
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---- gpa calculator ----

#[derive(Serialize)]
struct CalculatorResponse {
    trimester: String,
    trimester_no: u8,
    subjects: Vec<GradedSubject>,
    summary: GpaSummary,
}

fn calculator_response(state: crate::services::CalculatorState) -> CalculatorResponse {
    let summary = gpa::trimester_gpa(&state.subjects);
    CalculatorResponse {
        trimester: state.trimester_label(),
        trimester_no: state.trimester_no,
        subjects: state.subjects,
        summary,
    }
}

async fn calculator_state(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CalculatorResponse>, AppError> {
    let user = authenticate(&state, &headers).await?;
    let session = state.calculators.snapshot(user.id).await;
    Ok(Json(calculator_response(session)))
}

async fn add_calculator_subject(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<AddCalculatorSubjectRequest>,
) -> Result<Json<CalculatorResponse>, AppError> {
    let user = authenticate(&state, &headers).await?;

    let entry = match (req.subject_id, req.name) {
        (Some(id), _) => {
            let subject = repository::find_subject_by_id(&state.db, id)
                .await?
                .ok_or_else(|| AppError::BadRequest("unknown subject".to_string()))?;
            GradedSubject {
                subject_id: Some(subject.id),
                name: subject.name,
                credit_hours: subject.credit_hours,
                grade: None,
            }
        }
        (None, Some(name)) if !name.trim().is_empty() => GradedSubject {
            subject_id: None,
            name: name.trim().to_string(),
            credit_hours: req.credit_hours.unwrap_or(3),
            grade: None,
        },
        _ => {
            return Err(AppError::BadRequest(
                "either subject_id or name is required".to_string(),
            ));
        }
    };

    let session = state.calculators.add_subject(user.id, entry).await?;
    Ok(Json(calculator_response(session)))
}

async fn set_subject_grade(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(index): Path<usize>,
    Json(req): Json<SetGradeRequest>,
) -> Result<Json<CalculatorResponse>, AppError> {
    let user = authenticate(&state, &headers).await?;
    let session = state.calculators.set_grade(user.id, index, &req.grade).await?;
    Ok(Json(calculator_response(session)))
}

async fn remove_calculator_subject(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(index): Path<usize>,
) -> Result<Json<CalculatorResponse>, AppError> {
    let user = authenticate(&state, &headers).await?;
    let session = state.calculators.remove_subject(user.id, index).await?;
    Ok(Json(calculator_response(session)))
}

async fn save_trimester(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TrimesterRecord>, AppError> {
    let user = authenticate(&state, &headers).await?;

    let (trimester, subjects) = state.calculators.checked_for_save(user.id).await?;
    let summary = gpa::trimester_gpa(&subjects);
    let record =
        repository::upsert_trimester_record(&state.db, user.id, &trimester, &summary).await?;
    state.calculators.finish_save(user.id).await;

    info!("saved {} for user {}", record.trimester, user.id);
    Ok(Json(record))
}

#[derive(Serialize)]
struct HistoryResponse {
    records: Vec<TrimesterRecord>,
    cgpa: f64,
}

async fn gpa_history(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<HistoryResponse>, AppError> {
    let user = authenticate(&state, &headers).await?;
    let records = repository::fetch_trimester_records(&state.db, user.id).await?;
    let cgpa = gpa::cumulative_gpa(&records);
    Ok(Json(HistoryResponse { records, cgpa }))
}

async fn remove_trimester_record(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let user = authenticate(&state, &headers).await?;
    if repository::delete_trimester_record(&state.db, user.id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

async fn clear_gpa_history(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let user = authenticate(&state, &headers).await?;
    repository::delete_all_trimester_records(&state.db, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- feed ----

async fn list_posts(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Post>>, AppError> {
    authenticate(&state, &headers).await?;
    let posts = repository::fetch_posts(&state.db).await?;
    Ok(Json(posts))
}

async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<NewPostRequest>,
) -> Result<Json<Post>, AppError> {
    let user = authenticate(&state, &headers).await?;
    let content = req.content.trim();
    if content.is_empty() {
        return Err(AppError::BadRequest("post content must not be empty".to_string()));
    }
    let post = repository::insert_post(&state.db, &user, content).await?;
    Ok(Json(post))
}

async fn remove_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let user = authenticate(&state, &headers).await?;
    if repository::delete_post(&state.db, user.id, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

async fn list_comments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Vec<Comment>>, AppError> {
    authenticate(&state, &headers).await?;
    repository::find_post(&state.db, &id).await?.ok_or(AppError::NotFound)?;
    let comments = repository::fetch_comments(&state.db, &id).await?;
    Ok(Json(comments))
}

async fn create_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<NewCommentRequest>,
) -> Result<Json<Comment>, AppError> {
    let user = authenticate(&state, &headers).await?;
    let content = req.content.trim();
    if content.is_empty() {
        return Err(AppError::BadRequest("comment must not be empty".to_string()));
    }
    repository::find_post(&state.db, &id).await?.ok_or(AppError::NotFound)?;
    let comment = repository::insert_comment(&state.db, &id, &user, content).await?;
    Ok(Json(comment))
}

// ---- folders ----

async fn list_folders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Folder>>, AppError> {
    let user = authenticate(&state, &headers).await?;
    let folders = repository::fetch_folders(&state.db, user.id).await?;
    Ok(Json(folders))
}

async fn create_folder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<NewFolderRequest>,
) -> Result<Json<Folder>, AppError> {
    let user = authenticate(&state, &headers).await?;
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("folder name must not be empty".to_string()));
    }

    let folder = repository::insert_folder(&state.db, user.id, name)
        .await
        .map_err(|err| {
            if repository::is_unique_violation(&err) {
                AppError::Conflict(format!("folder {name} already exists"))
            } else {
                err.into()
            }
        })?;
    Ok(Json(folder))
}

async fn remove_folder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let user = authenticate(&state, &headers).await?;
    if repository::delete_folder(&state.db, user.id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

async fn save_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(req): Json<SavePostRequest>,
) -> Result<StatusCode, AppError> {
    let user = authenticate(&state, &headers).await?;

    repository::find_folder(&state.db, user.id, id).await?.ok_or(AppError::NotFound)?;
    repository::find_post(&state.db, &req.post_id).await?.ok_or(AppError::NotFound)?;

    repository::save_post_to_folder(&state.db, id, &req.post_id)
        .await
        .map_err(|err| {
            if repository::is_unique_violation(&err) {
                AppError::Conflict("post is already saved in this folder".to_string())
            } else {
                err.into()
            }
        })?;
    Ok(StatusCode::CREATED)
}

async fn list_folder_posts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Post>>, AppError> {
    let user = authenticate(&state, &headers).await?;
    repository::find_folder(&state.db, user.id, id).await?.ok_or(AppError::NotFound)?;
    let posts = repository::fetch_folder_posts(&state.db, id).await?;
    Ok(Json(posts))
}

async fn unsave_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, post_id)): Path<(i64, String)>,
) -> Result<StatusCode, AppError> {
    let user = authenticate(&state, &headers).await?;
    repository::find_folder(&state.db, user.id, id).await?.ok_or(AppError::NotFound)?;
    if repository::remove_post_from_folder(&state.db, id, &post_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
