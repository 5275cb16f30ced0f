use std::sync::Arc;

use axum::{
    extract::rejection::FormRejection,
    http::{header::LOCATION, StatusCode},
    response::{Html, IntoResponse},
    Extension, Form,
};
use axum_extra::{headers::Cookie, TypedHeader};
use serde::Deserialize;
use tracing::warn;

use crate::{
    admin_manager::AdminManager,
    authorization::{Capability, Context},
    error::Error,
    new_users::get_new_users_with_organizations,
    organization::Capacity,
    platform::MembershipRequest,
    routes::{error_response, NEW_USERS_PATH},
    views::{NewUsersView, NEW_USERS_TEMPLATE},
};

pub const SYSADMIN_REQUIRED: &str = "Need to be system administrator to administer";
pub const ASSIGN_UNAUTHORIZED: &str = "Unauthorized to assign members to organizations";

fn caller_context(admin_manager: &AdminManager, cookies: Option<TypedHeader<Cookie>>) -> Context {
    Context::new(cookies.and_then(|TypedHeader(cookies)| {
        cookies
            .get(admin_manager.config.get_cookie_name())
            .map(str::to_owned)
    }))
}

async fn render_new_users(admin_manager: &AdminManager) -> Result<String, Error> {
    let new_users = get_new_users_with_organizations(admin_manager.platform.as_ref()).await?;
    admin_manager
        .renderer
        .render(NEW_USERS_TEMPLATE, &NewUsersView { new_users })
}

pub async fn new_users_route(
    Extension(admin_manager): Extension<Arc<AdminManager>>,
    cookies: Option<TypedHeader<Cookie>>,
) -> impl IntoResponse {
    let context = caller_context(&admin_manager, cookies);
    if let Err(err) = admin_manager
        .authorizer
        .check_access(Capability::Sysadmin, &context, None)
        .await
    {
        warn!("{}", err);
        return (StatusCode::FORBIDDEN, SYSADMIN_REQUIRED).into_response();
    }
    match render_new_users(&admin_manager).await {
        Ok(html) => Html(html).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AssignUserForm {
    #[serde(default)]
    pub org: String,
    #[serde(default)]
    pub user: String,
}

pub async fn assign_user_route(
    Extension(admin_manager): Extension<Arc<AdminManager>>,
    cookies: Option<TypedHeader<Cookie>>,
    form: Result<Form<AssignUserForm>, FormRejection>,
) -> impl IntoResponse {
    let context = caller_context(&admin_manager, cookies);
    // Unreadable bodies check access against an empty org, same as missing fields.
    let (form, rejection) = match form {
        Ok(Form(form)) => (form, None),
        Err(rejection) => (AssignUserForm::default(), Some(rejection)),
    };
    if let Err(err) = admin_manager
        .authorizer
        .check_access(Capability::GroupMemberCreate, &context, Some(form.org.as_str()))
        .await
    {
        warn!("{}", err);
        return (StatusCode::FORBIDDEN, ASSIGN_UNAUTHORIZED).into_response();
    }
    if let Some(rejection) = rejection {
        warn!("{}", rejection);
        return rejection.into_response();
    }
    let request = MembershipRequest {
        id: form.org,
        username: form.user,
        role: Capacity::Member,
    };
    if let Err(err) = admin_manager
        .platform
        .create_group_membership(&context, request)
        .await
    {
        return error_response(err);
    }
    (StatusCode::FOUND, [(LOCATION, NEW_USERS_PATH)]).into_response()
}
