//! Dashboard page serving
//!
//! resolve location -> assemble -> render -> respond. A page is always served;
//! missing fragments and freshness only change what the page shows.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::config::AppState;
use crate::dashboard::{render_page, LocationKey, PageTemplateDescriptor};
use crate::http::{self, cache};

use super::router::RequestContext;

/// Serve `template` for the location named in the query string
pub async fn serve_page(
    ctx: &RequestContext<'_>,
    template: &PageTemplateDescriptor,
    state: &AppState,
) -> (Response<Full<Bytes>>, LocationKey) {
    let raw = super::query::location_param(ctx.query);
    let key = state.resolver.resolve(raw.as_deref());

    let page = state.assembler.assemble(template, &key).await;
    let html = render_page(&page, &state.config.dashboard.unavailable_text);

    let http_config = &state.config.http;
    let policy = cache::CachePolicy::for_max_age(http_config.cache_max_age);
    let etag = cache::generate_etag(&html);

    let response = if cache::check_etag_match(ctx.if_none_match.as_deref(), &etag) {
        http::build_304_response(&etag, policy)
    } else {
        http::build_page_response(
            html,
            &etag,
            policy,
            &http_config.server_name,
            http_config.enable_cors,
            ctx.is_head,
        )
    };
    (response, key)
}
