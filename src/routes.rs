use crate::{
    api::{employee, meeting},
    auth::handlers,
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    // Public credential routes, one scope per discriminator variant
    cfg.service(
        web::scope("/api/admin/auth")
            .service(
                web::resource("/register")
                    .wrap(build_limiter(config.rate_register_per_min))
                    .route(web::post().to(handlers::register_admin)),
            )
            .service(
                web::resource("/login")
                    .wrap(build_limiter(config.rate_login_per_min))
                    .route(web::post().to(handlers::login_admin)),
            ),
    );

    cfg.service(
        web::scope("/api/user/auth")
            .service(
                web::resource("/register")
                    .wrap(build_limiter(config.rate_register_per_min))
                    .route(web::post().to(handlers::register_user)),
            )
            .service(
                web::resource("/login")
                    .wrap(build_limiter(config.rate_login_per_min))
                    .route(web::post().to(handlers::login_user)),
            ),
    );

    cfg.service(
        web::scope("/api/employee")
            // /create-employee
            .service(
                web::resource("/create-employee").route(web::post().to(employee::create_employee)),
            )
            // /employees and /employees/{id} (reads)
            .service(web::resource("/employees").route(web::get().to(employee::list_employees)))
            .service(web::resource("/employees/{id}").route(web::get().to(employee::get_employee)))
            // /employee/{id} (mutations)
            .service(
                web::resource("/employee/{id}")
                    .route(web::put().to(employee::update_employee))
                    .route(web::delete().to(employee::delete_employee)),
            ),
    );

    cfg.service(
        web::scope("/api/meeting")
            // /api/meeting
            .service(
                web::resource("")
                    .route(web::post().to(meeting::create_meeting))
                    .route(web::get().to(meeting::list_meetings)),
            )
            // /api/meeting/{id}
            .service(
                web::resource("/{id}")
                    .route(web::get().to(meeting::get_meeting))
                    .route(web::put().to(meeting::update_meeting))
                    .route(web::delete().to(meeting::delete_meeting)),
            ),
    );
}
