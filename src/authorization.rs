use core::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{error::Unauthorized, organization::Capacity, platform::Platform};

/// Closed set of capabilities the admin endpoints ask the authorizer about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Sysadmin,
    GroupMemberCreate,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Sysadmin => "sysadmin",
                Self::GroupMemberCreate => "group_member_create",
            }
        )
    }
}

/// Identity of the caller for a single request. `None` is an anonymous caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    user: Option<String>,
}

impl Context {
    pub fn new(user: Option<String>) -> Self {
        Self {
            user: user.filter(|user| !user.is_empty()),
        }
    }
    pub fn anonymous() -> Self {
        Self::default()
    }
    pub fn get_user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn check_access(
        &self,
        capability: Capability,
        context: &Context,
        resource: Option<&str>,
    ) -> Result<(), Unauthorized>;
}

/// Capability policy evaluated against the platform's users and organizations.
pub struct PlatformAuthorizer {
    platform: Arc<dyn Platform>,
}

impl PlatformAuthorizer {
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        Self { platform }
    }

    async fn is_organization_admin(&self, user_name: &str, organization: &str) -> bool {
        match self.platform.list_all_organizations(true).await {
            Ok(organizations) => organizations
                .iter()
                .find(|candidate| candidate.get_name() == organization)
                .and_then(|candidate| candidate.get_capacity_of(user_name))
                .is_some_and(|capacity| capacity == Capacity::Admin),
            Err(err) => {
                warn!("{}", err);
                false
            }
        }
    }
}

#[async_trait]
impl Authorizer for PlatformAuthorizer {
    async fn check_access(
        &self,
        capability: Capability,
        context: &Context,
        resource: Option<&str>,
    ) -> Result<(), Unauthorized> {
        #[cfg(feature = "debug-logging")]
        tracing::debug!(
            "Checking {} for {:?} against {:?}",
            capability,
            context,
            resource
        );
        let user_name = match context.get_user() {
            Some(user_name) => user_name,
            None => return Err(Unauthorized::new(capability, resource)),
        };
        let user = match self.platform.list_all_users().await {
            Ok(users) => users.into_iter().find(|user| user.get_name() == user_name),
            Err(err) => {
                warn!("{}", err);
                None
            }
        };
        let user = match user {
            Some(user) => user,
            None => return Err(Unauthorized::new(capability, resource)),
        };
        if user.is_sysadmin() {
            debug!("{} granted {} as sysadmin", user_name, capability);
            return Ok(());
        }
        let granted = match (capability, resource) {
            (Capability::Sysadmin, _) => false,
            (Capability::GroupMemberCreate, Some(organization)) => {
                self.is_organization_admin(user_name, organization).await
            }
            (Capability::GroupMemberCreate, None) => false,
        };
        if granted {
            Ok(())
        } else {
            Err(Unauthorized::new(capability, resource))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        organization::{Member, Organization},
        platform::InMemoryPlatform,
        user::User,
    };

    fn authorizer() -> PlatformAuthorizer {
        let platform = InMemoryPlatform::new(
            vec![
                User::new("root".to_owned(), "Root".to_owned(), true),
                User::new("olivia".to_owned(), "Olivia".to_owned(), false),
                User::new("eddie".to_owned(), "Eddie".to_owned(), false),
                User::new("nobody".to_owned(), "Nobody".to_owned(), false),
            ],
            vec![
                Organization::new(
                    "org-a".to_owned(),
                    "Org A".to_owned(),
                    vec![
                        Member::new("olivia".to_owned(), Capacity::Admin),
                        Member::new("eddie".to_owned(), Capacity::Editor),
                    ],
                ),
                Organization::new("org-b".to_owned(), "Org B".to_owned(), Vec::new()),
            ],
        );
        PlatformAuthorizer::new(Arc::new(platform))
    }

    fn as_user(name: &str) -> Context {
        Context::new(Some(name.to_owned()))
    }

    #[tokio::test]
    async fn anonymous_callers_are_never_authorized() {
        let authorizer = authorizer();
        let context = Context::anonymous();
        assert_eq!(
            authorizer
                .check_access(Capability::Sysadmin, &context, None)
                .await,
            Err(Unauthorized::new(Capability::Sysadmin, None))
        );
        assert!(authorizer
            .check_access(Capability::GroupMemberCreate, &context, Some("org-a"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn unknown_callers_are_not_authorized() {
        let authorizer = authorizer();
        assert!(authorizer
            .check_access(Capability::Sysadmin, &as_user("ghost"), None)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn sysadmin_capability_requires_sysadmin_flag() {
        let authorizer = authorizer();
        assert!(authorizer
            .check_access(Capability::Sysadmin, &as_user("root"), None)
            .await
            .is_ok());
        assert!(authorizer
            .check_access(Capability::Sysadmin, &as_user("olivia"), None)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn group_member_create_is_scoped_to_administered_organization() {
        let authorizer = authorizer();
        let olivia = as_user("olivia");
        assert!(authorizer
            .check_access(Capability::GroupMemberCreate, &olivia, Some("org-a"))
            .await
            .is_ok());
        assert_eq!(
            authorizer
                .check_access(Capability::GroupMemberCreate, &olivia, Some("org-b"))
                .await,
            Err(Unauthorized::new(
                Capability::GroupMemberCreate,
                Some("org-b")
            ))
        );
        assert!(authorizer
            .check_access(Capability::GroupMemberCreate, &olivia, None)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn editors_cannot_create_memberships() {
        let authorizer = authorizer();
        assert!(authorizer
            .check_access(Capability::GroupMemberCreate, &as_user("eddie"), Some("org-a"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn sysadmin_may_create_memberships_anywhere() {
        let authorizer = authorizer();
        let root = as_user("root");
        assert!(authorizer
            .check_access(Capability::GroupMemberCreate, &root, Some("org-b"))
            .await
            .is_ok());
        assert!(authorizer
            .check_access(Capability::GroupMemberCreate, &root, None)
            .await
            .is_ok());
    }

    #[test]
    fn empty_identity_is_anonymous() {
        assert_eq!(Context::new(Some(String::new())), Context::anonymous());
    }
}
