//! In-memory repositories and a recording mailer for tests.

use crate::{
    abstract_trait::{
        DynProductCommandRepository, DynProductQueryRepository, DynUserCommandRepository,
        DynUserQueryRepository, EmailServiceTrait, ProductCommandRepositoryTrait,
        ProductQueryRepositoryTrait, UserCommandRepositoryTrait, UserQueryRepositoryTrait,
    },
    domain::requests::{EmailRequest, NewProduct, NewUser, ProductChanges, UserChanges},
    errors::{RepositoryError, ServiceError},
    model::{OwnerProductCount, Product, Role, User},
    repository::{ProductRepository, UserRepository},
};
use async_trait::async_trait;
use chrono::Utc;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    products: Vec<Product>,
    next_user_id: i32,
    next_product_id: i32,
}

impl Tables {
    fn unique_violation(&self, skip_id: i32, username: &str, email: &str) -> Option<String> {
        self.users.iter().filter(|u| u.id != skip_id).find_map(|u| {
            if u.username == username {
                Some("users_username_key".to_string())
            } else if u.email == email {
                Some("users_email_key".to_string())
            } else {
                None
            }
        })
    }
}

/// Shared backing store; clones see the same data.
#[derive(Clone, Default)]
pub struct MemoryDb {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn user_repository(&self) -> UserRepository {
        UserRepository {
            query: Arc::new(self.clone()) as DynUserQueryRepository,
            command: Arc::new(self.clone()) as DynUserCommandRepository,
        }
    }

    pub fn product_repository(&self) -> ProductRepository {
        ProductRepository {
            query: Arc::new(self.clone()) as DynProductQueryRepository,
            command: Arc::new(self.clone()) as DynProductCommandRepository,
        }
    }

    pub fn users(&self) -> Vec<User> {
        self.lock().users.clone()
    }

    pub fn products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }
}

fn sorted(mut users: Vec<User>) -> Vec<User> {
    users.sort_by_key(|u| u.id);
    users
}

#[async_trait]
impl UserQueryRepositoryTrait for MemoryDb {
    async fn find_all(&self, role: Option<Role>) -> Result<Vec<User>, RepositoryError> {
        let tables = self.lock();
        Ok(sorted(
            tables
                .users
                .iter()
                .filter(|u| role.is_none_or(|r| u.role == r))
                .cloned()
                .collect(),
        ))
    }

    async fn find_active(&self, role: Option<Role>) -> Result<Vec<User>, RepositoryError> {
        let all = UserQueryRepositoryTrait::find_all(self, role).await?;
        Ok(all.into_iter().filter(|u| u.is_active).collect())
    }

    async fn search(&self, role: Option<Role>, term: &str) -> Result<Vec<User>, RepositoryError> {
        let needle = term.to_lowercase();
        let mut found: Vec<User> = UserQueryRepositoryTrait::find_all(self, role)
            .await?
            .into_iter()
            .filter(|u| {
                u.username.to_lowercase().contains(&needle)
                    || u
                        .full_name
                        .as_deref()
                        .is_some_and(|n| n.to_lowercase().contains(&needle))
            })
            .collect();
        found.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(found)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, RepositoryError> {
        Ok(self
            .lock()
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let email = email.to_lowercase();
        Ok(self.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_seller_code(&self, code: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.seller_code.as_deref() == Some(code))
            .cloned())
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for MemoryDb {
    async fn create_user(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let mut tables = self.lock();
        let email = user.email.to_lowercase();

        if let Some(constraint) = tables.unique_violation(0, &user.username, &email) {
            return Err(RepositoryError::AlreadyExists(constraint));
        }

        tables.next_user_id += 1;
        let now = Utc::now().naive_utc();
        let created = User {
            id: tables.next_user_id,
            username: user.username.clone(),
            email,
            password: user.password_hash.clone(),
            phone: user.phone.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            is_active: user.is_active,
            seller_code: user.seller_code.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        tables.users.push(created.clone());

        Ok(created)
    }

    async fn update_user(&self, id: i32, changes: &UserChanges) -> Result<User, RepositoryError> {
        let mut tables = self.lock();

        let current = tables
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)?;

        let username = changes.username.clone().unwrap_or(current.username.clone());
        let email = changes
            .email
            .as_ref()
            .map(|e| e.to_lowercase())
            .unwrap_or(current.email.clone());

        if let Some(constraint) = tables.unique_violation(id, &username, &email) {
            return Err(RepositoryError::AlreadyExists(constraint));
        }

        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(RepositoryError::NotFound)?;

        user.username = username;
        user.email = email;
        if let Some(hash) = &changes.password_hash {
            user.password = hash.clone();
        }
        if let Some(phone) = &changes.phone {
            user.phone = phone.clone();
        }
        if let Some(full_name) = &changes.full_name {
            user.full_name = Some(full_name.clone());
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        if let Some(is_active) = changes.is_active {
            user.is_active = is_active;
        }
        if user.seller_code.is_none() {
            user.seller_code = changes.seller_code.clone();
        }
        user.updated_at = Some(Utc::now().naive_utc());

        Ok(user.clone())
    }

    async fn toggle_status(&self, id: i32) -> Result<User, RepositoryError> {
        let mut tables = self.lock();
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(RepositoryError::NotFound)?;

        user.is_active = !user.is_active;
        user.updated_at = Some(Utc::now().naive_utc());

        Ok(user.clone())
    }

    async fn delete_user(&self, id: i32) -> Result<User, RepositoryError> {
        let mut tables = self.lock();
        let index = tables
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or(RepositoryError::NotFound)?;

        let removed = tables.users.remove(index);
        tables.products.retain(|p| p.owner_id != id);

        Ok(removed)
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for MemoryDb {
    async fn find_all(&self, name: Option<&str>) -> Result<Vec<Product>, RepositoryError> {
        let needle = name.map(str::to_lowercase);
        Ok(self
            .lock()
            .products
            .iter()
            .filter(|p| {
                needle
                    .as_deref()
                    .is_none_or(|n| p.name.to_lowercase().contains(n))
            })
            .cloned()
            .collect())
    }

    async fn find_active(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self
            .lock()
            .products
            .iter()
            .filter(|p| p.is_active)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        Ok(self.lock().products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_owner(
        &self,
        owner_id: i32,
        active_only: bool,
    ) -> Result<Vec<Product>, RepositoryError> {
        Ok(self
            .lock()
            .products
            .iter()
            .filter(|p| p.owner_id == owner_id && (!active_only || p.is_active))
            .cloned()
            .collect())
    }

    async fn count_grouped_by_owner(&self) -> Result<Vec<OwnerProductCount>, RepositoryError> {
        let tables = self.lock();
        let mut counts: HashMap<i32, i64> = HashMap::new();
        for product in &tables.products {
            *counts.entry(product.owner_id).or_default() += 1;
        }

        let mut rows: Vec<OwnerProductCount> = tables
            .users
            .iter()
            .filter_map(|u| {
                counts.get(&u.id).map(|count| OwnerProductCount {
                    owner_id: u.id,
                    username: u.username.clone(),
                    product_count: *count,
                })
            })
            .collect();
        rows.sort_by(|a, b| {
            b.product_count
                .cmp(&a.product_count)
                .then(a.owner_id.cmp(&b.owner_id))
        });

        Ok(rows)
    }

    async fn count_per_seller(&self) -> Result<Vec<OwnerProductCount>, RepositoryError> {
        let tables = self.lock();
        let mut rows: Vec<OwnerProductCount> = tables
            .users
            .iter()
            .filter(|u| u.role == Role::Seller)
            .map(|u| OwnerProductCount {
                owner_id: u.id,
                username: u.username.clone(),
                product_count: tables.products.iter().filter(|p| p.owner_id == u.id).count()
                    as i64,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.product_count
                .cmp(&a.product_count)
                .then(a.owner_id.cmp(&b.owner_id))
        });

        Ok(rows)
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for MemoryDb {
    async fn create_product(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let mut tables = self.lock();

        if !tables.users.iter().any(|u| u.id == product.owner_id) {
            return Err(RepositoryError::ForeignKey(
                "products_owner_id_fkey".to_string(),
            ));
        }

        tables.next_product_id += 1;
        let now = Utc::now().naive_utc();
        let created = Product {
            id: tables.next_product_id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: (product.price * 100.0).round() / 100.0,
            is_active: product.is_active,
            image_url: product.image_url.clone(),
            owner_id: product.owner_id,
            created_at: Some(now),
            updated_at: Some(now),
        };
        tables.products.push(created.clone());

        Ok(created)
    }

    async fn update_product(
        &self,
        id: i32,
        changes: &ProductChanges,
    ) -> Result<Product, RepositoryError> {
        let mut tables = self.lock();
        let product = tables
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;

        if let Some(name) = &changes.name {
            product.name = name.clone();
        }
        if let Some(description) = &changes.description {
            product.description = description.clone();
        }
        if let Some(price) = changes.price {
            product.price = (price * 100.0).round() / 100.0;
        }
        if let Some(is_active) = changes.is_active {
            product.is_active = is_active;
        }
        if let Some(image_url) = &changes.image_url {
            product.image_url = Some(image_url.clone());
        }
        product.updated_at = Some(Utc::now().naive_utc());

        Ok(product.clone())
    }

    async fn delete_product(&self, id: i32) -> Result<Product, RepositoryError> {
        let mut tables = self.lock();
        let index = tables
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;

        Ok(tables.products.remove(index))
    }
}

/// Captures outgoing mail instead of talking to SMTP.
#[derive(Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<EmailRequest>>>,
    fail: bool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer whose every send fails like an unreachable SMTP relay.
    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|r| (r.to.clone(), r.subject.clone()))
            .collect()
    }
}

#[async_trait]
impl EmailServiceTrait for RecordingMailer {
    async fn send(&self, req: &EmailRequest) -> Result<(), ServiceError> {
        if self.fail {
            return Err(ServiceError::Mail("connection refused".to_string()));
        }

        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(EmailRequest {
                to: req.to.clone(),
                subject: req.subject.clone(),
                data: req.data.clone(),
            });

        Ok(())
    }
}
