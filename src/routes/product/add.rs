use crate::db;
use crate::forms;
use crate::helpers::{slug, JsonResponse};
use crate::models;
use actix_web::{
    post, web,
    web::{Bytes, Data},
    Error, Responder, Result,
};
use serde_valid::Validate;
use sqlx::PgPool;
use std::str;
use std::sync::Arc;

// Bounded retries when a concurrent submission grabs the candidate slug
// between the count and the insert.
const SLUG_RETRIES: i64 = 5;

#[tracing::instrument(name = "Submit product.", skip(body, pg_pool))]
#[post("")]
pub async fn add_handler(
    body: Bytes,
    user: Option<web::ReqData<Arc<models::User>>>,
    pg_pool: Data<PgPool>,
) -> Result<impl Responder> {
    let Some(user) = user else {
        return Err(JsonResponse::<models::Product>::build().unauthorized("Unauthorized"));
    };
    let form = body_into_form(body).await?;

    let category_id = form.category.parse::<i32>().map_err(|_| {
        JsonResponse::<models::Product>::build().bad_request("category must be a numeric id")
    })?;
    db::category::fetch_by_id(pg_pool.get_ref(), category_id)
        .await
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::Product>::build().not_found("category not found"))?;

    let tag_ids = form
        .tag_ids()
        .map_err(|err| JsonResponse::<models::Product>::build().bad_request(err))?;
    let resource_urls = form.resource_urls();

    let base_slug = slug::kebab(&form.name);
    // a name of pure punctuation slugs to nothing and the product would
    // have no reachable page
    if base_slug.is_empty() {
        return Err(JsonResponse::<models::Product>::build()
            .bad_request("name must contain at least one letter or digit"));
    }
    let matches = db::product::count_slug_matches(pg_pool.get_ref(), &base_slug)
        .await
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?;

    let (date_of_creation, date_of_death) = form.resolved_dates();

    // The slug column is unique; a collision on insert means another
    // submission won the race, so bump the suffix and try again.
    let mut taken = matches;
    loop {
        let candidate = if taken == 0 {
            base_slug.clone()
        } else {
            format!("{}-{}", base_slug, taken + 1)
        };

        let product = db::product::NewProduct {
            name: form.name.clone(),
            slug: candidate,
            slogan: form.slogan.clone(),
            description: form.description.clone(),
            status: form.status,
            date_of_creation,
            date_of_death,
            number_of_users: form.number_of_users,
            reason_for_failure: form.reason_for_failure.clone(),
            key_challenges: form.key_challenges.clone(),
            lessons_learned: form.lessons_learned.clone(),
            what_would_you_do_differently: form.what_would_you_do_differently.clone(),
            tips_or_advice: form.tips_or_advice.clone(),
            website: form.website.clone(),
            x_account: form.x_account.clone(),
            category_id,
            author_id: user.id.clone(),
        };

        match db::product::insert(pg_pool.get_ref(), product, &resource_urls, &tag_ids).await {
            Ok(created) => {
                tracing::info!("New product {} saved with slug {}", created.id, created.slug);
                return Ok(JsonResponse::build()
                    .set_id(created.id)
                    .set_item(created)
                    .created("Created"));
            }
            Err(db::product::InsertError::DuplicateSlug) if taken < matches + SLUG_RETRIES => {
                taken += 1;
            }
            Err(err) => {
                return Err(
                    JsonResponse::<models::Product>::build().internal_server_error(err)
                );
            }
        }
    }
}

async fn body_into_form(body: Bytes) -> Result<forms::SubmitProductForm, Error> {
    let body_str = str::from_utf8(&body).map_err(|err| {
        JsonResponse::<forms::SubmitProductForm>::build().internal_server_error(err.to_string())
    })?;
    let deserializer = &mut serde_json::Deserializer::from_str(body_str);
    serde_path_to_error::deserialize(deserializer)
        .map_err(|err| {
            let msg = format!("{}:{:?}", err.path().to_string(), err);
            JsonResponse::<forms::SubmitProductForm>::build().bad_request(msg)
        })
        .and_then(|form: forms::SubmitProductForm| {
            if let Err(errors) = form.validate() {
                let err_msg = format!("Invalid data received {:?}", errors.to_string());
                tracing::debug!(err_msg);

                return Err(JsonResponse::<models::Product>::build().form_error(errors.to_string()));
            }

            Ok(form)
        })
}
