use crate::{
    api::{benefits, employee, leave_request, payroll, time_tracking},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{
    middleware::{Condition, from_fn},
    web,
};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter; a rate of 0 disables the wrap
    fn build_limiter(
        requests_per_min: u32,
    ) -> Condition<Governor<PeerIpKeyExtractor, NoOpMiddleware>> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min.max(1))
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Condition::new(requests_per_min > 0, Governor::new(&cfg))
    }

    let login_limiter = build_limiter(config.rate_login_per_min);
    let register_limiter = build_limiter(config.rate_register_per_min);
    let protected_limiter = build_limiter(config.rate_protected_per_min);

    // Public routes
    cfg.service(
        web::resource("/register")
            .wrap(register_limiter)
            .route(web::post().to(handlers::register)),
    );
    cfg.service(
        web::resource("/login")
            .wrap(login_limiter)
            .route(web::post().to(handlers::login)),
    );

    // Protected routes
    cfg.service(
        web::scope("")
            .wrap(from_fn(auth_middleware))
            // authentication
            .wrap(protected_limiter) // rate limiting
            .service(
                web::scope("/employees")
                    // /employees
                    .service(web::resource("").route(web::get().to(employee::list_employees)))
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::resource("/leave-requests")
                    .route(web::get().to(leave_request::list_leave_requests)),
            )
            .service(
                web::resource("/leave-requests/{employee_id}")
                    .route(web::get().to(leave_request::list_leave_requests_by_employee)),
            )
            .service(
                web::resource("/leave-request")
                    .route(web::post().to(leave_request::create_leave_request)),
            )
            .service(
                web::resource("/leave-request/{id}")
                    .route(web::put().to(leave_request::update_leave_request))
                    .route(web::delete().to(leave_request::delete_leave_request)),
            )
            .service(
                web::scope("/payroll")
                    // /payroll
                    .service(
                        web::resource("")
                            .route(web::get().to(payroll::list_payroll))
                            .route(web::post().to(payroll::create_payroll)),
                    )
                    // /payroll/{employee_id}
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::get().to(payroll::get_payroll))
                            .route(web::put().to(payroll::update_payroll))
                            .route(web::delete().to(payroll::delete_payroll)),
                    ),
            )
            .service(
                web::resource("/process-payroll")
                    .route(web::post().to(payroll::process_payroll)),
            )
            .service(
                web::scope("/time-tracking")
                    // /time-tracking
                    .service(
                        web::resource("")
                            .route(web::get().to(time_tracking::list_time_tracking)),
                    )
                    // /time-tracking/clock-in
                    .service(
                        web::resource("/clock-in")
                            .route(web::post().to(time_tracking::clock_in)),
                    )
                    // /time-tracking/clock-out/{id}
                    .service(
                        web::resource("/clock-out/{id}")
                            .route(web::put().to(time_tracking::clock_out)),
                    ),
            )
            .service(
                web::scope("/benefits")
                    // /benefits
                    .service(
                        web::resource("")
                            .route(web::get().to(benefits::list_benefits))
                            .route(web::post().to(benefits::create_benefits)),
                    )
                    // /benefits/{employee_id}
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::get().to(benefits::get_benefits))
                            .route(web::put().to(benefits::update_benefits))
                            .route(web::delete().to(benefits::delete_benefits)),
                    ),
            ),
    );
}

// LOGIN
//  └─ access_token (15 min)

// API REQUEST
//  └─ Authorization: Bearer access_token
