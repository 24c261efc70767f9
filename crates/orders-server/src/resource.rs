//! HTTP addressing for each entity.

use orders_storage::{Agent, Customer, Entity, Order};

/// An [`Entity`] exposed under a collection path and an item path.
pub trait Resource: Entity {
    /// e.g. `/agents`
    const COLLECTION: &'static str;
    /// e.g. `/agents/{agentCode}` (axum and OpenAPI share this syntax)
    const ITEM: &'static str;
    /// Name of the path parameter in `ITEM`.
    const KEY_PARAM: &'static str;
}

impl Resource for Agent {
    const COLLECTION: &'static str = "/agents";
    const ITEM: &'static str = "/agents/{agentCode}";
    const KEY_PARAM: &'static str = "agentCode";
}

impl Resource for Customer {
    const COLLECTION: &'static str = "/customers";
    const ITEM: &'static str = "/customers/{custCode}";
    const KEY_PARAM: &'static str = "custCode";
}

impl Resource for Order {
    const COLLECTION: &'static str = "/orders";
    const ITEM: &'static str = "/orders/{ordNum}";
    const KEY_PARAM: &'static str = "ordNum";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_names_its_param<R: Resource>() {
        assert!(R::ITEM.starts_with(R::COLLECTION));
        assert!(R::ITEM.ends_with(&format!("{{{}}}", R::KEY_PARAM)));
    }

    #[test]
    fn item_paths_are_consistent() {
        item_names_its_param::<Agent>();
        item_names_its_param::<Customer>();
        item_names_its_param::<Order>();
    }
}
