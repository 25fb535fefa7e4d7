use crate::configuration::Settings;
use crate::middleware;
use crate::routes;
use actix_cors::Cors;
use actix_web::{dev::Server, error, http, web, App, HttpServer};
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let settings = web::Data::new(settings);
    let pg_pool = web::Data::new(pg_pool);

    let tera = tera::Tera::new("templates/**/*.html")
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
    let tera = web::Data::new(tera);

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let msg: String = match err {
            error::JsonPayloadError::Deserialize(err) => format!(
                "{{\"kind\":\"deserialize\",\"line\":{}, \"column\":{}, \"msg\":\"{}\"}}",
                err.line(),
                err.column(),
                err
            ),
            _ => format!("{{\"kind\":\"other\",\"msg\":\"{}\"}}", err),
        };
        error::InternalError::new(msg, http::StatusCode::BAD_REQUEST).into()
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::authentication::Manager::new())
            .wrap(Cors::permissive())
            .app_data(json_config.clone())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(
                web::scope("/products")
                    .service(routes::product::add_handler)
                    .service(routes::product::comment_add_handler)
                    .service(routes::pages::product_detail),
            )
            .service(web::scope("/webhooks").service(routes::webhook::users_handler))
            .service(routes::pages::index)
            .service(routes::pages::categories_index)
            .service(routes::pages::category)
            .service(routes::pages::tag)
            .service(routes::pages::submit_product)
            .app_data(pg_pool.clone())
            .app_data(settings.clone())
            .app_data(tera.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
