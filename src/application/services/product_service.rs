//! Product Service
//!
//! Store-scoped product catalog with chosung search and cursor pagination.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use validator::Validate;

use super::store_service::{owned_store, StoreError};
use crate::application::dto::request::{CreateProductRequest, UpdateProductRequest};
use crate::application::pagination::{paginate, Page, PaginationError, PAGE_SIZE};
use crate::domain::services::chosung;
use crate::domain::services::ownership::{ensure_owner, InStore, Principal};
use crate::domain::{
    CategoryRepository, Product, ProductFilter, ProductRepository, ProductSize, StoreRepository,
};
use crate::infrastructure::metrics;
use crate::shared::error::{AppError, FieldErrors};
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::{field_errors, required};

const NAME_TAKEN: &str = "product with this name already exists in the store.";

fn invalid_category(id: i64) -> String {
    format!("Invalid pk \"{}\" - object does not exist.", id)
}

fn push_error(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors.entry(field.to_string()).or_default().push(message.into());
}

fn to_i32(value: i64, field: &str) -> Result<i32, StoreError> {
    i32::try_from(value).map_err(|_| {
        StoreError::Validation(FieldErrors::from([(
            field.to_string(),
            vec!["Ensure this value is between 0 and 2147483647.".to_string()],
        )]))
    })
}

fn to_size(value: &str) -> Result<ProductSize, StoreError> {
    ProductSize::parse(value).ok_or_else(|| {
        StoreError::Validation(FieldErrors::from([(
            "size".to_string(),
            vec![format!("\"{}\" is not a valid choice.", value)],
        )]))
    })
}

/// Product service trait
#[async_trait]
pub trait ProductService: Send + Sync {
    async fn create(
        &self,
        principal: Principal,
        store_id: i64,
        request: CreateProductRequest,
    ) -> Result<Product, StoreError>;

    /// One page of the store's products, optionally filtered by `search`
    /// against name or chosung.
    async fn list(
        &self,
        principal: Principal,
        store_id: i64,
        search: Option<&str>,
        cursor: Option<&str>,
    ) -> Result<Page<Product>, StoreError>;

    async fn retrieve(
        &self,
        principal: Principal,
        store_id: i64,
        product_id: i64,
    ) -> Result<Product, StoreError>;

    async fn update(
        &self,
        principal: Principal,
        store_id: i64,
        product_id: i64,
        request: UpdateProductRequest,
    ) -> Result<Product, StoreError>;

    async fn delete(&self, principal: Principal, store_id: i64, product_id: i64) -> Result<(), StoreError>;
}

/// ProductService implementation
pub struct ProductServiceImpl<S: ?Sized, C: ?Sized, P: ?Sized> {
    store_repo: Arc<S>,
    category_repo: Arc<C>,
    product_repo: Arc<P>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<S, C, P> ProductServiceImpl<S, C, P>
where
    S: StoreRepository + ?Sized,
    C: CategoryRepository + ?Sized,
    P: ProductRepository + ?Sized,
{
    pub fn new(
        store_repo: Arc<S>,
        category_repo: Arc<C>,
        product_repo: Arc<P>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            store_repo,
            category_repo,
            product_repo,
            id_generator,
        }
    }

    /// Load store and product, then check ownership.
    async fn owned_product(
        &self,
        principal: Principal,
        store_id: i64,
        product_id: i64,
    ) -> Result<Product, StoreError> {
        let store = self
            .store_repo
            .find_by_id(store_id)
            .await?
            .ok_or(StoreError::NotFound)?;
        let product = self
            .product_repo
            .find_in_store(store_id, product_id)
            .await?
            .ok_or(StoreError::NotFound)?;

        ensure_owner(principal, &InStore::new(&store, &product))?;
        Ok(product)
    }

    /// Field validation plus the checks that need the database: the
    /// category must belong to this store and the name must be free.
    async fn check_fields<T: Validate>(
        &self,
        request: &T,
        store_id: i64,
        category: Option<i64>,
        name: Option<&str>,
        current: Option<&Product>,
    ) -> Result<(), StoreError> {
        let mut errors = match request.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => field_errors(&e),
        };

        if let Some(category_id) = category.filter(|id| current.map_or(true, |p| p.category_id != *id)) {
            let found = self.category_repo.find_in_store(store_id, category_id).await?;
            if found.is_none() {
                push_error(&mut errors, "category", invalid_category(category_id));
            }
        }

        let renamed = name.filter(|n| current.map_or(true, |p| p.name != *n));
        if let Some(name) = renamed.filter(|_| !errors.contains_key("name")) {
            let taken = self
                .product_repo
                .name_exists(store_id, name, current.map(|p| p.id))
                .await?;
            if taken {
                push_error(&mut errors, "name", NAME_TAKEN);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Validation(errors))
        }
    }

    /// Constraint violations raised by the write itself, after a concurrent
    /// rename or category delete slipped past `check_fields`.
    fn constraint_violation(category_id: i64) -> impl Fn(AppError) -> StoreError {
        move |err| match err {
            AppError::Conflict(_) => StoreError::Validation(FieldErrors::from([(
                "name".to_string(),
                vec![NAME_TAKEN.to_string()],
            )])),
            AppError::BadRequest(_) => StoreError::Validation(FieldErrors::from([(
                "category".to_string(),
                vec![invalid_category(category_id)],
            )])),
            other => other.into(),
        }
    }
}

#[async_trait]
impl<S, C, P> ProductService for ProductServiceImpl<S, C, P>
where
    S: StoreRepository + ?Sized + 'static,
    C: CategoryRepository + ?Sized + 'static,
    P: ProductRepository + ?Sized + 'static,
{
    async fn create(
        &self,
        principal: Principal,
        store_id: i64,
        request: CreateProductRequest,
    ) -> Result<Product, StoreError> {
        let store = owned_store(&*self.store_repo, principal, store_id).await?;
        self.check_fields(&request, store.id, request.category, request.name.as_deref(), None)
            .await?;

        let name = required(request.name, "name")?;
        let now = Utc::now();
        let product = Product {
            id: self.id_generator.generate(),
            store_id: store.id,
            category_id: required(request.category, "category")?,
            price: to_i32(required(request.price, "price")?, "price")?,
            cost: to_i32(required(request.cost, "cost")?, "cost")?,
            chosung: chosung::transliterate(&name),
            name,
            description: required(request.description, "description")?,
            barcode: required(request.barcode, "barcode")?,
            sell_by_days: to_i32(required(request.sell_by_days, "sell_by_days")?, "sell_by_days")?,
            size: to_size(&required(request.size, "size")?)?,
            created_at: now,
            updated_at: now,
        };

        let created = self
            .product_repo
            .create(&product)
            .await
            .map_err(Self::constraint_violation(product.category_id))?;

        metrics::record_product_created();
        tracing::info!(store_id, product_id = created.id, "Product created");

        Ok(created)
    }

    async fn list(
        &self,
        principal: Principal,
        store_id: i64,
        search: Option<&str>,
        cursor: Option<&str>,
    ) -> Result<Page<Product>, StoreError> {
        let store_id = owned_store(&*self.store_repo, principal, store_id).await?.id;
        let filter = ProductFilter::search(search);

        let page = paginate(cursor, PAGE_SIZE, |query| {
            let repo = Arc::clone(&self.product_repo);
            let filter = filter.clone();
            async move { repo.find_page(store_id, &filter, &query).await }
        })
        .await;

        match page {
            Ok(page) => Ok(page),
            Err(PaginationError::InvalidCursor) => Err(StoreError::InvalidCursor),
            Err(PaginationError::Fetch(e)) => Err(e.into()),
        }
    }

    async fn retrieve(
        &self,
        principal: Principal,
        store_id: i64,
        product_id: i64,
    ) -> Result<Product, StoreError> {
        self.owned_product(principal, store_id, product_id).await
    }

    async fn update(
        &self,
        principal: Principal,
        store_id: i64,
        product_id: i64,
        request: UpdateProductRequest,
    ) -> Result<Product, StoreError> {
        let mut product = self.owned_product(principal, store_id, product_id).await?;
        self.check_fields(
            &request,
            store_id,
            request.category,
            request.name.as_deref(),
            Some(&product),
        )
        .await?;

        if let Some(category_id) = request.category {
            product.category_id = category_id;
        }
        if let Some(price) = request.price {
            product.price = to_i32(price, "price")?;
        }
        if let Some(cost) = request.cost {
            product.cost = to_i32(cost, "cost")?;
        }
        if let Some(name) = request.name {
            product.rename(name);
        }
        if let Some(description) = request.description {
            product.description = description;
        }
        if let Some(barcode) = request.barcode {
            product.barcode = barcode;
        }
        if let Some(days) = request.sell_by_days {
            product.sell_by_days = to_i32(days, "sell_by_days")?;
        }
        if let Some(size) = request.size {
            product.size = to_size(&size)?;
        }
        product.updated_at = Utc::now();

        self.product_repo
            .update(&product)
            .await
            .map_err(Self::constraint_violation(product.category_id))
    }

    async fn delete(&self, principal: Principal, store_id: i64, product_id: i64) -> Result<(), StoreError> {
        let product = self.owned_product(principal, store_id, product_id).await?;
        self.product_repo.delete(store_id, product.id).await?;

        tracing::info!(store_id, product_id, "Product deleted");
        Ok(())
    }
}
