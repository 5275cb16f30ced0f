use crate::{
    error::{Error, RenderError},
    new_users::NewUsers,
    routes::{ASSIGN_USER_PATH, NEW_USERS_PATH},
};

pub const NEW_USERS_TEMPLATE: &str = "new_users/admin/new_users.html";

pub struct AdminTab {
    pub route: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

pub const ADMIN_TAB: AdminTab = AdminTab {
    route: NEW_USERS_PATH,
    label: "New users",
    icon: "user",
};

/// View state handed to the renderer by the listing endpoint.
pub struct NewUsersView {
    pub new_users: NewUsers,
}

pub trait Renderer: Send + Sync {
    fn render(&self, template: &str, view: &NewUsersView) -> Result<String, Error>;
}

#[derive(Default)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, template: &str, view: &NewUsersView) -> Result<String, Error> {
        match template {
            NEW_USERS_TEMPLATE => Ok(render_new_users(view)),
            _ => Err(RenderError::UnknownTemplate(template.to_owned()).into()),
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_admin_tab(html: &mut String, count: usize) {
    html.push_str(&format!(
        "<nav class=\"admin-tabs\"><ul><li class=\"active\"><a href=\"{route}\"><i class=\"fa fa-{icon}\"></i> {label} <span class=\"badge\">{count}</span></a></li></ul></nav>",
        route = ADMIN_TAB.route,
        icon = ADMIN_TAB.icon,
        label = escape_html(ADMIN_TAB.label),
        count = count,
    ));
}

fn render_new_users(view: &NewUsersView) -> String {
    let new_users = &view.new_users;
    let mut html = String::from(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>New users</title>\
         <link rel=\"stylesheet\" href=\"/new_users/new_users.css\"></head><body>",
    );
    render_admin_tab(&mut html, new_users.count());
    html.push_str("<h1>New users</h1><ul id=\"new-user-list\">");
    for user in new_users.users() {
        let name = escape_html(user.get_name());
        html.push_str(&format!(
            "<li class=\"srf-user\"><a href=\"/user/{name}\">{display_name}</a>\
             <form method=\"post\" action=\"{action}\">\
             <input type=\"hidden\" name=\"user\" value=\"{name}\">\
             <select id=\"org-{name}\" name=\"org\"><option value=\"\">Select an organization</option>",
            name = name,
            display_name = escape_html(user.get_display_name()),
            action = ASSIGN_USER_PATH,
        ));
        for organization in new_users.get_organizations() {
            html.push_str(&format!(
                "<option value=\"{value}\">{label}</option>",
                value = escape_html(organization.get_name()),
                label = escape_html(organization.get_display_name()),
            ));
        }
        html.push_str("</select><button type=\"submit\">Assign</button></form></li>");
    }
    html.push_str("</ul></body></html>");
    html
}
