use std::path::Path as FsPath;

use application::{Application, NewApplication};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum_typed_multipart::{TypedMultipart, TypedMultipartError};
use branch::Branch;
use common::{DbPool, Error};
use permissions::{check_branch_key_access, scope_for};
use utils::{read_cv, remove_cv, store_cv, validate_cv};
use validator::Validate;

use crate::schemas::application::CreateApplicationRequest;
use crate::schemas::pagination::PaginationOptions;
use crate::{Config, Session};

#[instrument(skip_all)]
pub(crate) async fn create_application(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	data: Result<TypedMultipart<CreateApplicationRequest>, TypedMultipartError>,
) -> Result<(StatusCode, Json<Application>), Error> {
	let TypedMultipart(request) = data?;

	request.validate()?;

	let birthdate = request.parsed_birthdate()?;
	let cv = request.cv_file;

	validate_cv(cv.metadata.content_type.as_deref(), cv.contents.len())?;

	let conn = pool.get().await?;

	// Check before touching the disk, the insert repeats this in its
	// transaction
	if !Branch::slug_exists(request.branch_key.clone(), &conn).await? {
		return Err(Error::InvalidBranchKey);
	}

	let cv_path = store_cv(
		&config.cv_upload_dir,
		&request.email,
		cv.metadata.file_name.as_deref(),
		&cv.contents,
	)?;

	let new_application = NewApplication {
		name:                    request.name,
		email:                   request.email,
		phone:                   request.phone,
		birthdate,
		branch_key:              request.branch_key,
		department:              request.department,
		experience_years:        request.experience_years,
		message:                 request.message,
		privacy_policy_accepted: request.privacy_policy_accepted,
		cv_file_path:            cv_path.to_string_lossy().into_owned(),
	};

	let application = match new_application.insert(&conn).await {
		Ok(application) => application,
		Err(e) => {
			remove_cv(&cv_path);

			return Err(e);
		},
	};

	Ok((StatusCode::CREATED, Json(application)))
}

#[instrument(skip(pool, session))]
pub(crate) async fn get_applications(
	State(pool): State<DbPool>,
	session: Session,
	Query(p_opts): Query<PaginationOptions>,
) -> Result<Json<Vec<Application>>, Error> {
	let conn = pool.get().await?;

	let applications =
		Application::list(scope_for(&session.user), p_opts.into(), &conn)
			.await?;

	Ok(Json(applications))
}

#[instrument(skip(pool, session))]
pub(crate) async fn download_cv(
	State(pool): State<DbPool>,
	session: Session,
	Path(a_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let application = Application::get(a_id, &conn).await?;

	check_branch_key_access(&session.user, &application.branch_key, &conn)
		.await?;

	let path = FsPath::new(&application.cv_file_path);
	let bytes = read_cv(path)?;

	let file_name = path
		.file_name()
		.map_or_else(|| "cv".to_string(), |n| n.to_string_lossy().into_owned());

	let headers = [
		(header::CONTENT_TYPE, "application/octet-stream".to_string()),
		(
			header::CONTENT_DISPOSITION,
			format!("attachment; filename=\"{file_name}\""),
		),
	];

	Ok((headers, bytes))
}
