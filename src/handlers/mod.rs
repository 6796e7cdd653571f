pub mod auth;
pub mod employee;


use actix_web::web;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(auth::index)))
        .service(
            web::resource("/login")
                .route(web::get().to(auth::login_form))
                .route(web::post().to(auth::login)),
        )
        .service(web::resource("/logout").route(web::get().to(auth::logout)))
        .service(web::resource("/employees").route(web::get().to(employee::get_employees)))
        .service(web::resource("/employees/new").route(web::get().to(employee::new_employee)))
        .service(web::resource("/employees/create").route(web::post().to(employee::create_employee)))
        .service(web::resource("/employees/submitted").route(web::get().to(employee::employee_submitted)))
        .service(
            web::resource("/employees/{employee_id}/delete")
                .route(web::post().to(employee::delete_employee)),
        )
        .service(web::resource("/api/employees").route(web::get().to(employee::api_employees)));
}
