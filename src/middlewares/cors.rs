use actix_cors::Cors;

pub fn create_cors() -> Cors {
    Cors::default()
        // 前台是内网 Quasar 页面，放开来源；上生产需收紧域名
        .allowed_origin_fn(|_, _req_head| true)
        .allowed_methods(vec!["GET", "POST", "PUT", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}
