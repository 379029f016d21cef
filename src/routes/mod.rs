pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

/// Registers every `/api/v1` route. Literal paths (`/profile`,
/// `/profile/tasks`) are registered before the `/{id}` patterns so they are
/// matched first.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(users::register)
            .service(users::login)
            .service(users::find_users)
            .service(users::get_profile)
            .service(users::get_profile_tasks)
            .service(users::find_user_by_id)
            .service(users::get_user_tasks)
            .service(users::update_user)
            .service(users::delete_user),
    )
    .service(
        web::scope("/tasks")
            .service(tasks::create_task)
            .service(tasks::find_all_tasks)
            .service(tasks::find_task_by_id)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    );
}
