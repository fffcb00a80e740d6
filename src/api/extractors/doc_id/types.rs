/*
 * Responsibility
 * - One tag type per storefront collection
 * - Adding a collection = one enum + one Resource impl here, then routes
 */
use super::core::Resource;
use crate::repos::user_repo;

pub enum Users {}
impl Resource for Users {
    const COLLECTION: &'static str = user_repo::COLLECTION;
    const LABEL: &'static str = "user";
}

pub enum Bags {}
impl Resource for Bags {
    const COLLECTION: &'static str = "bags";
    const LABEL: &'static str = "bag";
    const DEFAULT_LIMIT: Option<i64> = Some(3);
}

pub enum Products {}
impl Resource for Products {
    const COLLECTION: &'static str = "products";
    const LABEL: &'static str = "product";
    const DEFAULT_LIMIT: Option<i64> = Some(3);
}

pub enum Foods {}
impl Resource for Foods {
    const COLLECTION: &'static str = "foods";
    const LABEL: &'static str = "food";
}

pub enum Categories {}
impl Resource for Categories {
    const COLLECTION: &'static str = "categories";
    const LABEL: &'static str = "category";
}

pub enum Cart {}
impl Resource for Cart {
    const COLLECTION: &'static str = "cart";
    const LABEL: &'static str = "cart item";
}

pub enum Reviews {}
impl Resource for Reviews {
    const COLLECTION: &'static str = "reviews";
    const LABEL: &'static str = "review";
}
