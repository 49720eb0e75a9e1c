use actix_cors::Cors;

pub fn create_cors() -> Cors {
    Cors::default()
        .allowed_origin_fn(|_, _req_head| {
            // Production deployments restrict this to the dashboard origin.
            true
        })
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_any_header()
        // The session cookie requires credentialed requests.
        .supports_credentials()
        .max_age(3600)
}
