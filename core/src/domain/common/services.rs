use crate::domain::{cart::ports::CartStorage, catalog::ports::CatalogRepository};

/// Aggregate implementing every service trait of the storefront.
///
/// Each domain module adds its own `impl XService for Service<..>` block, so
/// adapters are injected once here and shared by all operations.
#[derive(Clone)]
pub struct Service<CR, CS>
where
    CR: CatalogRepository,
    CS: CartStorage,
{
    pub(crate) catalog_repository: CR,
    pub(crate) cart_storage: CS,
}

impl<CR, CS> Service<CR, CS>
where
    CR: CatalogRepository,
    CS: CartStorage,
{
    pub fn new(catalog_repository: CR, cart_storage: CS) -> Self {
        Self {
            catalog_repository,
            cart_storage,
        }
    }
}
