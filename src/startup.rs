use std::net::TcpListener;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    routes::{default_route, result_route},
    services::ResultFetcher,
};

pub fn run(listener: TcpListener, fetcher: ResultFetcher) -> Result<Server, std::io::Error> {
    let fetcher = web::Data::new(fetcher);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::health_check)
            .service(result_route::get_result)
            .app_data(fetcher.clone())
            .app_data(
                web::QueryConfig::default().error_handler(result_route::query_error_handler),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
