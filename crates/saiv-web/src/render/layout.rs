//! Page chrome: head, navigation, flash messages.

use std::fmt::Write;

use axum::response::Html;
use saiv_entity::user::User;

use super::components::{AlertKind, alert};
use super::html::escape;
use crate::extractors::Flash;

/// Application title.
pub const APP_TITLE: &str = "SAIV Instructor Dashboard";

/// Navigation entries as `(path, label)`.
pub const NAV: [(&str, &str); 7] = [
    ("/", "Home"),
    ("/overview", "Overview"),
    ("/courses", "Courses"),
    ("/sessions", "Sessions"),
    ("/audit", "Audit Logs"),
    ("/reports", "Reports"),
    ("/manage", "Manage"),
];

const STYLE: &str = "body{font-family:sans-serif;margin:0;color:#222}\
nav{background:#1f3b57;padding:8px 16px}nav a{color:#fff;margin-right:14px;text-decoration:none}\
nav a.active{font-weight:bold;text-decoration:underline}nav .user{float:right;color:#cde}\
main{padding:16px 24px}.metrics{display:flex;flex-wrap:wrap;gap:12px}\
.metric{border:1px solid #ddd;border-radius:6px;padding:8px 14px;min-width:140px}\
.metric-label{font-size:12px;color:#666}.metric-value{font-size:22px}\
.alert{padding:8px 12px;border-radius:4px;margin:8px 0}.alert-success{background:#e6f4ea}\
.alert-info{background:#e8f0fe}.alert-warning{background:#fef7e0}.alert-error{background:#fce8e6}\
table.data{border-collapse:collapse;width:100%}table.data td,table.data th{border-bottom:1px solid #eee;padding:4px 8px;text-align:left}\
.badge{padding:2px 6px;border-radius:4px;font-size:12px;background:#eee}\
.badge-success,.success-badge{background:#d4edda}.badge-warning,.warning-badge{background:#fff3cd}\
.badge-danger,.danger-badge{background:#f8d7da}.badge-info,.info-badge{background:#d1ecf1}\
.empty{color:#888;font-style:italic}.tabs a{margin-right:12px}.danger-zone{border:1px solid #e0a0a0;padding:8px}\
form.inline{display:inline}label{display:block;margin:4px 0}";

fn flash_html(flash: &Flash) -> String {
    let mut out = String::new();
    if let Some(msg) = flash.msg.as_deref().filter(|m| !m.is_empty()) {
        out.push_str(&alert(AlertKind::Success, msg));
    }
    if let Some(err) = flash.err.as_deref().filter(|m| !m.is_empty()) {
        out.push_str(&alert(AlertKind::Error, err));
    }
    out
}

fn document(title: &str, nav: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>{} - {APP_TITLE}</title><style>{STYLE}</style></head><body>{nav}<main>{body}</main></body></html>",
        escape(title)
    ))
}

/// A signed-in page with navigation.
pub fn page(title: &str, active: &str, user: Option<&User>, flash: &Flash, body: &str) -> Html<String> {
    let mut nav = String::from("<nav>");
    for (path, label) in NAV {
        let class = if path == active { r#" class="active""# } else { "" };
        let _ = write!(nav, r#"<a href="{path}"{class}>{label}</a>"#);
    }
    if let Some(user) = user {
        let _ = write!(
            nav,
            r#"<span class="user">{} ({}) <a href="/logout">Logout</a></span>"#,
            escape(user.display_name()),
            escape(user.role.label())
        );
    } else {
        nav.push_str(r#"<span class="user"><a href="/logout">Logout</a></span>"#);
    }
    nav.push_str("</nav>");

    let content = format!("<h1>{}</h1>{}{body}", escape(title), flash_html(flash));
    document(title, &nav, &content)
}

/// The sign-in form.
pub fn login_page(flash: &Flash, email: &str) -> Html<String> {
    let body = format!(
        r#"<h1>{APP_TITLE}</h1><p>Sign in with your instructor, TA or admin account.</p>{}<form method="post" action="/login"><label>Email<input type="email" name="email" value="{}" required></label><label>Password<input type="password" name="password" required></label><button type="submit" class="btn btn-primary">Login</button></form>"#,
        flash_html(flash),
        escape(email)
    );
    document("Login", "", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use saiv_entity::user::UserRole;

    #[test]
    fn test_page_marks_active_and_shows_user() {
        let user = User {
            id: "u1".into(),
            email: "prof@uni.edu".into(),
            full_name: Some("Prof <X>".into()),
            role: UserRole::Instructor,
        };
        let Html(html) = page("Overview", "/overview", Some(&user), &Flash::default(), "<p>x</p>");
        assert!(html.contains(r#"<a href="/overview" class="active">Overview</a>"#));
        assert!(html.contains("Prof &lt;X&gt;"));
        assert!(html.contains("<p>x</p>"));
    }

    #[test]
    fn test_flash_messages() {
        let flash = Flash {
            msg: Some("Saved".into()),
            err: Some("<oops>".into()),
        };
        let Html(html) = page("Home", "/", None, &flash, "");
        assert!(html.contains("alert-success\">Saved"));
        assert!(html.contains("&lt;oops&gt;"));
    }

    #[test]
    fn test_login_page_keeps_email() {
        let Html(html) = login_page(&Flash::error("Authentication failed. Please login again."), "a@b.c");
        assert!(html.contains(r#"value="a@b.c""#));
        assert!(html.contains("Authentication failed. Please login again."));
    }
}
