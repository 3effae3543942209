//! Route table for the user resource.

use actix_web::web;

use crate::inbound::http::users::{create_user, delete_user, get_user, list_users, update_user};
use crate::inbound::http::validation::{json_error_handler, path_error_handler};

/// Register the `/user` handlers and the extractor configuration that turns
/// body and path failures into 400 envelopes.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_directory::inbound::http::routes::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(list_users)
        .service(create_user)
        .service(get_user)
        .service(update_user)
        .service(delete_user);
}
