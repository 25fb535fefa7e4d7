use crate::configuration::Settings;
use crate::db;
use crate::forms;
use crate::helpers::{signature, JsonResponse};
use crate::models;
use actix_web::{
    post,
    web::{Bytes, Data},
    Error, HttpRequest, HttpResponse, Responder, Result,
};
use sqlx::PgPool;

/// Mirrors the identity provider's user lifecycle into local tables.
/// Verification happens over the raw body before anything is parsed;
/// unrecognized event types are acknowledged and ignored.
#[tracing::instrument(name = "User lifecycle webhook.", skip(req, body, settings, pg_pool))]
#[post("/users")]
pub async fn users_handler(
    req: HttpRequest,
    body: Bytes,
    settings: Data<Settings>,
    pg_pool: Data<PgPool>,
) -> Result<impl Responder> {
    let msg_id = required_header(&req, "svix-id")?;
    let timestamp = required_header(&req, "svix-timestamp")?;
    let signature_header = required_header(&req, "svix-signature")?;

    signature::verify(
        &settings.webhook_secret,
        &msg_id,
        &timestamp,
        &signature_header,
        &body,
    )
    .map_err(|err| {
        tracing::error!("Error verifying webhook: {}", err);
        JsonResponse::<models::User>::build().bad_request("signature verification failed")
    })?;

    let event: forms::webhook::Event = serde_json::from_slice(&body)
        .map_err(|err| JsonResponse::<models::User>::build().bad_request(err.to_string()))?;

    match event.event_type.as_str() {
        "user.created" => {
            let email = event.data.primary_email().unwrap_or_default();
            db::user::insert_with_profile(
                pg_pool.get_ref(),
                &event.data.id,
                email,
                &event.data.display_name(),
                event.data.image_url.as_deref(),
            )
            .await
            .map_err(|err| JsonResponse::<models::User>::build().internal_server_error(err))?;
        }
        "user.updated" => {
            let email = event.data.primary_email().unwrap_or_default();
            db::user::update_with_profile(
                pg_pool.get_ref(),
                &event.data.id,
                email,
                &event.data.display_name(),
                event.data.image_url.as_deref(),
            )
            .await
            .map_err(|err| JsonResponse::<models::User>::build().internal_server_error(err))?;
        }
        "user.deleted" => {
            db::user::delete(pg_pool.get_ref(), &event.data.id)
                .await
                .map_err(|err| JsonResponse::<models::User>::build().internal_server_error(err))?;
        }
        other => {
            tracing::info!("Ignoring webhook event type {}", other);
        }
    }

    tracing::info!(
        "Webhook {} of type {} handled",
        msg_id,
        event.event_type
    );

    Ok(HttpResponse::Ok().finish())
}

fn required_header(req: &HttpRequest, name: &str) -> Result<String, Error> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
        .ok_or_else(|| {
            JsonResponse::<models::User>::build()
                .bad_request(format!("missing webhook header {}", name))
        })
}
