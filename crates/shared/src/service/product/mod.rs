mod command;
mod query;

pub use self::command::ProductCommandService;
pub use self::query::ProductQueryService;

use crate::{
    abstract_trait::DynUserQueryRepository,
    domain::responses::ProductResponse,
    errors::ServiceError,
    model::{Product, User},
};
use std::collections::HashMap;

/// Joins products with the password-free view of their owners.
pub(crate) async fn with_owners(
    users: &DynUserQueryRepository,
    products: Vec<Product>,
) -> Result<Vec<ProductResponse>, ServiceError> {
    let mut owner_ids: Vec<i32> = products.iter().map(|p| p.owner_id).collect();
    owner_ids.sort_unstable();
    owner_ids.dedup();

    let owners: HashMap<i32, User> = users
        .find_by_ids(&owner_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    Ok(products
        .into_iter()
        .map(|p| {
            let owner = owners.get(&p.owner_id);
            ProductResponse::from(p).with_owner(owner)
        })
        .collect())
}
