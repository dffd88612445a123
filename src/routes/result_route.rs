use actix_web::{
    error::{InternalError, QueryPayloadError},
    get,
    http::StatusCode,
    web, HttpRequest, HttpResponse, ResponseError,
};
use serde::Serialize;

use crate::{
    domain::{ResultParams, ResultQuery, ResultRecord, ValidationError},
    services::{FetchError, ResultFetcher},
};

#[derive(Debug, thiserror::Error)]
pub enum ResultError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Could not fetch result")]
    Fetch(#[from] FetchError),
}

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ResponseError for ResultError {
    fn status_code(&self) -> StatusCode {
        match self {
            ResultError::Validation(_) => StatusCode::BAD_REQUEST,
            ResultError::Fetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            ResultError::Validation(_) => None,
            ResultError::Fetch(e) => Some(e.to_string()),
        };

        HttpResponse::build(self.status_code()).json(ErrorBody {
            status: "error",
            message: self.to_string(),
            error,
        })
    }
}

/// Keeps malformed query strings (e.g. a repeated `board`) on the JSON error shape.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorBody {
        status: "error",
        message: err.to_string(),
        error: None,
    });

    InternalError::from_response(err, response).into()
}

#[derive(Serialize)]
struct ResultResponse {
    status: &'static str,
    board: String,
    roll: String,
    reg: String,
    year: String,
    data: ResultRecord,
}

#[get("/result")]
async fn get_result(
    params: web::Query<ResultParams>,
    fetcher: web::Data<ResultFetcher>,
) -> Result<HttpResponse, ResultError> {
    let query = ResultQuery::try_from(params.into_inner())?;

    let data = fetcher.fetch(&query).await?;

    Ok(HttpResponse::Ok().json(ResultResponse {
        status: "success",
        board: query.raw_board,
        roll: query.roll,
        reg: query.reg,
        year: query.year,
        data,
    }))
}
