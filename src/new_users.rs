//! Users that belong to no organization and are not sysadmins.
//!
//! The set is recomputed from fresh platform snapshots on every call and never cached.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::{error::Error, organization::Organization, platform::Platform, user::User};

/// Result of the extended query: the new-user names plus the organization list it was computed from.
#[derive(Debug, Clone)]
pub struct NewUsers {
    names: BTreeSet<String>,
    organizations: Vec<Organization>,
    users: Vec<User>,
}

impl NewUsers {
    pub fn get_names(&self) -> &BTreeSet<String> {
        &self.names
    }
    pub fn get_organizations(&self) -> &Vec<Organization> {
        &self.organizations
    }
    /// The new users themselves, in name order, resolved from the same snapshot as the names.
    pub fn users(&self) -> Vec<&User> {
        let mut users: Vec<&User> = self
            .users
            .iter()
            .filter(|user| self.names.contains(user.get_name()))
            .collect();
        users.sort_by(|a, b| a.get_name().cmp(b.get_name()));
        users.dedup_by(|a, b| a.get_name() == b.get_name());
        users
    }
    pub fn count(&self) -> usize {
        self.names.len()
    }
    pub fn collapse(self) -> (BTreeSet<String>, Vec<Organization>) {
        (self.names, self.organizations)
    }
}

pub fn compute_new_users(users: &[User], organizations: &[Organization]) -> BTreeSet<String> {
    let members: HashSet<&String> = organizations
        .iter()
        .flat_map(|organization| organization.get_users().iter())
        .map(|member| member.get_name())
        .collect();
    users
        .iter()
        .filter(|user| !user.is_sysadmin())
        .map(|user| user.get_name())
        .filter(|name| !members.contains(name))
        .cloned()
        .collect()
}

pub async fn get_new_users_with_organizations(platform: &dyn Platform) -> Result<NewUsers, Error> {
    let organizations = platform.list_all_organizations(true).await?;
    let users = platform.list_all_users().await?;
    let names = compute_new_users(&users, &organizations);
    debug!(
        "{} new users out of {} users across {} organizations",
        names.len(),
        users.len(),
        organizations.len()
    );
    Ok(NewUsers {
        names,
        organizations,
        users,
    })
}

pub async fn get_new_users(platform: &dyn Platform) -> Result<BTreeSet<String>, Error> {
    Ok(get_new_users_with_organizations(platform)
        .await?
        .collapse()
        .0)
}

/// Helper for templates that only need the navigation badge count. Callers already holding
/// a [`NewUsers`] use [`NewUsers::count`] to avoid a second query.
pub async fn get_new_users_count(platform: &dyn Platform) -> Result<usize, Error> {
    Ok(get_new_users(platform).await?.len())
}
