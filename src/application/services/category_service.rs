//! Category Service
//!
//! Categories are scoped to a store and only its owner may touch them.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::store_service::{owned_store, validate_request, StoreError};
use crate::application::dto::request::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::domain::services::ownership::{ensure_owner, InStore, Principal};
use crate::domain::{Category, CategoryRepository, StoreRepository};
use crate::shared::error::{AppError, FieldErrors};
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::required;

const NAME_TAKEN: &str = "category with this name already exists in the store.";

fn name_taken() -> StoreError {
    StoreError::Validation(FieldErrors::from([(
        "name".to_string(),
        vec![NAME_TAKEN.to_string()],
    )]))
}

/// Category service trait
#[async_trait]
pub trait CategoryService: Send + Sync {
    async fn create(
        &self,
        principal: Principal,
        store_id: i64,
        request: CreateCategoryRequest,
    ) -> Result<Category, StoreError>;

    async fn list(&self, principal: Principal, store_id: i64) -> Result<Vec<Category>, StoreError>;

    async fn retrieve(
        &self,
        principal: Principal,
        store_id: i64,
        category_id: i64,
    ) -> Result<Category, StoreError>;

    async fn update(
        &self,
        principal: Principal,
        store_id: i64,
        category_id: i64,
        request: UpdateCategoryRequest,
    ) -> Result<Category, StoreError>;

    /// Delete a category together with its products
    async fn delete(&self, principal: Principal, store_id: i64, category_id: i64) -> Result<(), StoreError>;
}

/// CategoryService implementation
pub struct CategoryServiceImpl<S: ?Sized, C: ?Sized> {
    store_repo: Arc<S>,
    category_repo: Arc<C>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<S, C> CategoryServiceImpl<S, C>
where
    S: StoreRepository + ?Sized,
    C: CategoryRepository + ?Sized,
{
    pub fn new(store_repo: Arc<S>, category_repo: Arc<C>, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self {
            store_repo,
            category_repo,
            id_generator,
        }
    }

    /// Load store and category, then check ownership.
    async fn owned_category(
        &self,
        principal: Principal,
        store_id: i64,
        category_id: i64,
    ) -> Result<Category, StoreError> {
        let store = self
            .store_repo
            .find_by_id(store_id)
            .await?
            .ok_or(StoreError::NotFound)?;
        let category = self
            .category_repo
            .find_in_store(store_id, category_id)
            .await?
            .ok_or(StoreError::NotFound)?;

        ensure_owner(principal, &InStore::new(&store, &category))?;
        Ok(category)
    }

    async fn persist(&self, category: &Category, creating: bool) -> Result<Category, StoreError> {
        let result = if creating {
            self.category_repo.create(category).await
        } else {
            self.category_repo.update(category).await
        };

        match result {
            Ok(saved) => Ok(saved),
            Err(AppError::Conflict(_)) => Err(name_taken()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl<S, C> CategoryService for CategoryServiceImpl<S, C>
where
    S: StoreRepository + ?Sized + 'static,
    C: CategoryRepository + ?Sized + 'static,
{
    async fn create(
        &self,
        principal: Principal,
        store_id: i64,
        request: CreateCategoryRequest,
    ) -> Result<Category, StoreError> {
        let store = owned_store(&*self.store_repo, principal, store_id).await?;
        validate_request(&request)?;

        let name = required(request.name, "name")?;
        if self.category_repo.name_exists(store.id, &name, None).await? {
            return Err(name_taken());
        }

        let category = Category::new(self.id_generator.generate(), store.id, name);
        let created = self.persist(&category, true).await?;

        tracing::info!(store_id, category_id = created.id, "Category created");
        Ok(created)
    }

    async fn list(&self, principal: Principal, store_id: i64) -> Result<Vec<Category>, StoreError> {
        let store = owned_store(&*self.store_repo, principal, store_id).await?;
        Ok(self.category_repo.find_by_store(store.id).await?)
    }

    async fn retrieve(
        &self,
        principal: Principal,
        store_id: i64,
        category_id: i64,
    ) -> Result<Category, StoreError> {
        self.owned_category(principal, store_id, category_id).await
    }

    async fn update(
        &self,
        principal: Principal,
        store_id: i64,
        category_id: i64,
        request: UpdateCategoryRequest,
    ) -> Result<Category, StoreError> {
        let mut category = self.owned_category(principal, store_id, category_id).await?;
        validate_request(&request)?;

        let Some(name) = request.name else {
            return Ok(category);
        };
        if name != category.name
            && self
                .category_repo
                .name_exists(store_id, &name, Some(category.id))
                .await?
        {
            return Err(name_taken());
        }

        category.name = name;
        category.updated_at = Utc::now();
        self.persist(&category, false).await
    }

    async fn delete(&self, principal: Principal, store_id: i64, category_id: i64) -> Result<(), StoreError> {
        let category = self.owned_category(principal, store_id, category_id).await?;
        self.category_repo.delete(store_id, category.id).await?;

        tracing::info!(store_id, category_id, "Category deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::ownership::AccessDenied;
    use crate::domain::Store;
    use crate::infrastructure::memory::MemoryDatabase;

    const OWNER: Principal = Principal::User(1);

    async fn setup() -> (CategoryServiceImpl<MemoryDatabase, MemoryDatabase>, Arc<MemoryDatabase>, Store) {
        let db = Arc::new(MemoryDatabase::new());
        let store = StoreRepository::create(&*db, &Store::new(10, 1, "Corner Cafe"))
            .await
            .unwrap();
        let service = CategoryServiceImpl::new(db.clone(), db.clone(), Arc::new(SnowflakeGenerator::new(1)));
        (service, db, store)
    }

    fn named(name: &str) -> CreateCategoryRequest {
        CreateCategoryRequest {
            name: Some(name.into()),
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let (categories, _, store) = setup().await;
        let coffee = categories.create(OWNER, store.id, named("Coffee")).await.unwrap();
        assert_eq!(coffee.store_id, store.id);

        let listed = categories.list(OWNER, store.id).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_name_in_store() {
        let (categories, _, store) = setup().await;
        categories.create(OWNER, store.id, named("Coffee")).await.unwrap();

        let Err(StoreError::Validation(errors)) =
            categories.create(OWNER, store.id, named("Coffee")).await
        else {
            panic!("expected validation error");
        };
        assert_eq!(errors["name"], vec![NAME_TAKEN.to_string()]);
    }

    #[tokio::test]
    async fn test_same_name_allowed_in_other_store() {
        let (categories, db, store) = setup().await;
        let other = StoreRepository::create(&*db, &Store::new(11, 1, "Second Cafe"))
            .await
            .unwrap();

        categories.create(OWNER, store.id, named("Coffee")).await.unwrap();
        assert!(categories.create(OWNER, other.id, named("Coffee")).await.is_ok());
    }

    #[tokio::test]
    async fn test_category_from_other_store_is_missing() {
        let (categories, db, store) = setup().await;
        let other = StoreRepository::create(&*db, &Store::new(11, 1, "Second Cafe"))
            .await
            .unwrap();
        let coffee = categories.create(OWNER, other.id, named("Coffee")).await.unwrap();

        let result = categories.retrieve(OWNER, store.id, coffee.id).await;
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_non_owner_and_anonymous() {
        let (categories, _, store) = setup().await;
        let coffee = categories.create(OWNER, store.id, named("Coffee")).await.unwrap();

        assert!(matches!(
            categories.retrieve(Principal::User(2), store.id, coffee.id).await,
            Err(StoreError::Denied(AccessDenied::Forbidden))
        ));
        assert!(matches!(
            categories.delete(Principal::Anonymous, store.id, coffee.id).await,
            Err(StoreError::Denied(AccessDenied::Unauthenticated))
        ));
    }

    #[tokio::test]
    async fn test_rename_to_own_name_is_allowed() {
        let (categories, _, store) = setup().await;
        let coffee = categories.create(OWNER, store.id, named("Coffee")).await.unwrap();

        let same = UpdateCategoryRequest {
            name: Some("Coffee".into()),
        };
        assert!(categories.update(OWNER, store.id, coffee.id, same).await.is_ok());
    }
}
