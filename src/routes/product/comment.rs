use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{post, web, web::Data, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Add comment.", skip(pg_pool))]
#[post("/comments")]
pub async fn comment_add_handler(
    form: web::Json<forms::CommentForm>,
    user: Option<web::ReqData<Arc<models::User>>>,
    pg_pool: Data<PgPool>,
) -> Result<impl Responder> {
    let Some(user) = user else {
        return Err(JsonResponse::<models::Comment>::build().unauthorized("Unauthorized"));
    };

    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Comment>::build().form_error(errors.to_string()));
    }

    db::comment::insert(
        pg_pool.get_ref(),
        &form.comment_text,
        form.product_id,
        &user.id,
    )
    .await
    .map(|comment| {
        JsonResponse::build()
            .set_id(comment.id)
            .set_item(comment)
            .created("Created")
    })
    .map_err(|err| JsonResponse::<models::Comment>::build().internal_server_error(err))
}
