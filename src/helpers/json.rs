use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{Error, HttpResponse};
use serde_derive::Serialize;

#[derive(Serialize)]
pub(crate) struct JsonResponse<T> {
    pub(crate) status: String,
    pub(crate) message: String,
    pub(crate) code: u32,
    pub(crate) id: Option<i32>,
    pub(crate) item: Option<T>,
    pub(crate) list: Option<Vec<T>>,
}

#[derive(Serialize, Default)]
pub struct JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    message: String,
    id: Option<i32>,
    item: Option<T>,
    list: Option<Vec<T>>,
}

impl<T> JsonResponse<T>
where
    T: serde::Serialize,
{
    pub(crate) fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder {
            message: String::new(),
            id: None,
            item: None,
            list: None,
        }
    }
}

impl<T> JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    pub(crate) fn set_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub(crate) fn set_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    pub(crate) fn set_msg(mut self, msg: impl ToString) -> Self {
        self.message = msg.to_string();
        self
    }

    fn into_response(self, status: &str, code: StatusCode) -> JsonResponse<T> {
        JsonResponse {
            status: status.to_string(),
            message: self.message,
            code: code.as_u16() as u32,
            id: self.id,
            item: self.item,
            list: self.list,
        }
    }

    pub(crate) fn created(self, msg: impl ToString) -> HttpResponse {
        let response = self.set_msg(msg).into_response("OK", StatusCode::CREATED);
        HttpResponse::Created().json(response)
    }

    fn error(self, code: StatusCode, msg: impl ToString) -> Error {
        let response = self.set_msg(msg).into_response("Error", code);
        let body = serde_json::to_string(&response).unwrap_or_else(|_| response.message.clone());
        InternalError::new(body, code).into()
    }

    pub(crate) fn bad_request(self, msg: impl ToString) -> Error {
        self.error(StatusCode::BAD_REQUEST, msg)
    }

    pub(crate) fn form_error(self, msg: impl ToString) -> Error {
        self.error(StatusCode::BAD_REQUEST, msg)
    }

    pub(crate) fn unauthorized(self, msg: impl ToString) -> Error {
        self.error(StatusCode::UNAUTHORIZED, msg)
    }

    pub(crate) fn not_found(self, msg: impl ToString) -> Error {
        self.error(StatusCode::NOT_FOUND, msg)
    }

    pub(crate) fn internal_server_error(self, msg: impl ToString) -> Error {
        self.error(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    pub(crate) fn to_string(self) -> String {
        let response = self.into_response("Error", StatusCode::BAD_REQUEST);
        serde_json::to_string(&response).unwrap_or_default()
    }
}
