use crate::configuration::Settings;
use crate::db;
use crate::helpers::signature::constant_time_eq;
use crate::middleware::authentication::get_header;
use actix_web::{dev::ServiceRequest, web, HttpMessage};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use sqlx::{Pool, Postgres};
use std::sync::Arc;

/// Session token issued by the identity provider integration:
/// `Authorization: Bearer <user_id>:<hex hmac-sha256(secret, user_id)>`.
/// A valid token resolves to a mirrored user row; a malformed or forged
/// one is a hard error rather than a fallthrough.
#[tracing::instrument(name = "try authenticate via session token")]
pub async fn try_token(req: &mut ServiceRequest) -> Result<bool, String> {
    let authorization = get_header::<String>(req, "authorization")?;
    if authorization.is_none() {
        return Ok(false);
    }
    let authorization = authorization.unwrap();

    let Some(token) = authorization.strip_prefix("Bearer ") else {
        return Ok(false);
    };
    let Some((user_id, signature)) = token.split_once(':') else {
        return Err("access token is malformed".to_string());
    };

    let settings = req.app_data::<web::Data<Settings>>().unwrap();
    let mut mac = match Hmac::<Sha256>::new_from_slice(settings.auth.secret.as_bytes()) {
        Ok(mac) => mac,
        Err(err) => {
            tracing::error!("error generating hmac {err:?}");
            return Err("".to_string());
        }
    };
    mac.update(user_id.as_bytes());
    let expected = format!("{:x}", mac.finalize().into_bytes());
    if !constant_time_eq(expected.as_bytes(), signature.as_bytes()) {
        return Err("access token signature mismatch".to_string());
    }

    let db_pool = req
        .app_data::<web::Data<Pool<Postgres>>>()
        .unwrap()
        .get_ref();
    let user = db::user::fetch(db_pool, user_id)
        .await?
        .ok_or_else(|| "user is not known".to_string())?;

    if req.extensions_mut().insert(Arc::new(user)).is_some() {
        tracing::error!("authentication middleware already called once");
        return Err("".to_string());
    }

    Ok(true)
}
