/*
 * Responsibility
 * - URL layout of the storefront API
 * - Guarded methods get the access middleware per method (`guarded`), then are merged
 *   with the public methods on the same path
 */
use axum::{
    Router,
    routing::{MethodRouter, get, patch, post, put},
};

use crate::api::extractors::doc_id::{Bags, Cart, Categories, Foods, Products, Reviews};
use crate::api::handlers::{
    cart::list_cart,
    categories::products_in_category,
    health::{health, liveness},
    resources,
    reviews,
    token::issue_token,
    users::{create_user, list_users, make_admin},
};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let guarded = |route: MethodRouter<AppState>| {
        middleware::auth::access::apply(route, state.clone())
    };

    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health))
        .route("/jwt", get(issue_token))
        // users
        .route("/users", get(list_users).post(create_user))
        .route("/users/admin/{id}", guarded(put(make_admin)))
        // bags
        .route(
            "/bags",
            get(resources::list::<Bags>).merge(guarded(post(resources::create::<Bags>))),
        )
        .route("/allbags", get(resources::list_all::<Bags>))
        .route("/bag/{id}", get(resources::get_one::<Bags>))
        .route(
            "/bags/{id}",
            get(resources::get_one::<Bags>).merge(guarded(
                patch(resources::update::<Bags>).delete(resources::delete::<Bags>),
            )),
        )
        // products
        .route(
            "/products",
            get(resources::list::<Products>).merge(guarded(post(resources::create::<Products>))),
        )
        .route("/allproducts", get(resources::list_all::<Products>))
        .route(
            "/products/{id}",
            get(resources::get_one::<Products>).merge(guarded(
                patch(resources::update::<Products>).delete(resources::delete::<Products>),
            )),
        )
        // foods
        .route(
            "/foods",
            get(resources::list::<Foods>).merge(guarded(post(resources::create::<Foods>))),
        )
        .route("/allfoods", get(resources::list_all::<Foods>))
        .route(
            "/foods/{id}",
            get(resources::get_one::<Foods>).merge(guarded(
                patch(resources::update::<Foods>).delete(resources::delete::<Foods>),
            )),
        )
        // categories
        .route("/categories", get(resources::list::<Categories>))
        .route("/categories/{id}", get(products_in_category))
        // cart
        .route("/cart", get(list_cart).post(resources::create::<Cart>))
        .route(
            "/cart/{id}",
            get(resources::get_one::<Cart>)
                .put(resources::update::<Cart>)
                .delete(resources::delete::<Cart>),
        )
        // reviews
        .route(
            "/reviews",
            guarded(get(reviews::by_email).post(resources::create::<Reviews>)),
        )
        .route("/reviews/{id}", get(reviews::by_bag))
}
