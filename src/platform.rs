use std::{collections::HashSet, fs, path::Path};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    authorization::Context,
    error::{ConfigError, Error, PlatformError},
    organization::{Capacity, Organization},
    user::User,
};

/// Membership creation request handed to the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipRequest {
    pub id: String,
    pub username: String,
    pub role: Capacity,
}

/// The host platform's user and organization store.
#[async_trait]
pub trait Platform: Send + Sync {
    async fn list_all_organizations(&self, include_users: bool) -> Result<Vec<Organization>, Error>;
    async fn list_all_users(&self) -> Result<Vec<User>, Error>;
    async fn create_group_membership(
        &self,
        context: &Context,
        request: MembershipRequest,
    ) -> Result<(), Error>;
}

#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub organizations: Vec<Organization>,
}

impl Seed {
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => return Err(ConfigError::Read(path.to_owned(), err).into()),
        };
        let seed: Seed = match toml::from_str(&contents) {
            Ok(seed) => seed,
            Err(err) => return Err(ConfigError::Parse(path.to_owned(), err).into()),
        };
        seed.validate()?;
        Ok(seed)
    }

    fn validate(&self) -> Result<(), Error> {
        let mut user_names: HashSet<&String> = HashSet::new();
        for user in self.users.iter() {
            if !user_names.insert(user.get_name()) {
                return Err(ConfigError::DuplicateUser(user.get_name().to_owned()).into());
            }
        }
        let mut organization_names: HashSet<&String> = HashSet::new();
        for organization in self.organizations.iter() {
            if !organization_names.insert(organization.get_name()) {
                return Err(
                    ConfigError::DuplicateOrganization(organization.get_name().to_owned()).into(),
                );
            }
        }
        Ok(())
    }
}

struct Store {
    users: Vec<User>,
    organizations: Vec<Organization>,
}

/// Process-local stand-in for the host platform, holding users and organizations in memory.
pub struct InMemoryPlatform {
    store: RwLock<Store>,
}

impl InMemoryPlatform {
    pub fn new(users: Vec<User>, organizations: Vec<Organization>) -> Self {
        Self {
            store: RwLock::new(Store {
                users,
                organizations,
            }),
        }
    }
    pub fn from_seed(seed: Seed) -> Self {
        Self::new(seed.users, seed.organizations)
    }
}

impl Default for InMemoryPlatform {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

#[async_trait]
impl Platform for InMemoryPlatform {
    async fn list_all_organizations(&self, include_users: bool) -> Result<Vec<Organization>, Error> {
        let store = self.store.read().await;
        Ok(if include_users {
            store.organizations.to_owned()
        } else {
            store
                .organizations
                .iter()
                .map(Organization::without_users)
                .collect()
        })
    }

    async fn list_all_users(&self) -> Result<Vec<User>, Error> {
        Ok(self.store.read().await.users.to_owned())
    }

    async fn create_group_membership(
        &self,
        context: &Context,
        request: MembershipRequest,
    ) -> Result<(), Error> {
        let mut store = self.store.write().await;
        if !store
            .users
            .iter()
            .any(|user| user.get_name() == &request.username)
        {
            return Err(PlatformError::UserNotFound(request.username).into());
        }
        let organization = match store
            .organizations
            .iter_mut()
            .find(|organization| organization.get_name() == &request.id)
        {
            Some(organization) => organization,
            None => return Err(PlatformError::OrganizationNotFound(request.id).into()),
        };
        organization.upsert_member(&request.username, request.role);
        info!(
            "{} added {} to {} as {}",
            context.get_user().unwrap_or("anonymous"),
            request.username,
            request.id,
            request.role
        );
        Ok(())
    }
}
