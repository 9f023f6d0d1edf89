use crate::{api::employee, auth::handlers};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Employee record controller. Route shapes mirror the MVC-style pages:
    // a GET renders a view model, the matching POST performs the mutation
    // and redirects back to the list.
    cfg.service(
        web::scope("/Employees")
            .service(web::resource("").route(web::get().to(employee::index)))
            .service(web::resource("/Details/{id}").route(web::get().to(employee::details)))
            .service(
                web::resource("/Create")
                    .route(web::get().to(employee::create_form))
                    .route(web::post().to(employee::create)),
            )
            .service(
                web::resource("/Edit/{id}")
                    .route(web::get().to(employee::edit_form))
                    .route(web::post().to(employee::edit)),
            )
            .service(
                web::resource("/Delete/{id}")
                    .route(web::get().to(employee::delete_form))
                    .route(web::post().to(employee::delete_confirmed)),
            ),
    );

    // Login entry point the create gate redirects to.
    cfg.service(
        web::scope("/EmployeesLogin")
            .service(
                web::resource("/Login")
                    .route(web::get().to(handlers::login_form))
                    .route(web::post().to(handlers::login)),
            )
            .service(web::resource("/Logout").route(web::post().to(handlers::logout))),
    );
}
