//! Page shell shared by every page.

use super::escape;

/// Shown by match pages when no match has been chosen yet
pub const NO_MATCH_SELECTED: &str = "Go to Home to select a match first.";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1d1d1f; background: #f6f7f9; }
header { display: flex; align-items: center; gap: 1.5rem; padding: .6rem 1.5rem; background: #0b2341; color: #fff; }
header a { color: #cfe0ff; text-decoration: none; }
header a.active { color: #fff; font-weight: 600; border-bottom: 2px solid #fff; }
header .user { margin-left: auto; display: flex; gap: .8rem; align-items: center; }
main { padding: 1rem 1.5rem 2rem; max-width: 1200px; }
table { border-collapse: collapse; background: #fff; margin: .5rem 0 1.5rem; }
th, td { padding: .35rem .7rem; border-bottom: 1px solid #e3e6ea; text-align: left; }
th { background: #eef1f5; }
td.num { text-align: right; }
img.flag { height: 18px; vertical-align: middle; }
.caption { color: #444; }
.notice { padding: .7rem 1rem; background: #e8f1fd; border-left: 4px solid #2f6fd0; }
.error { padding: .7rem 1rem; background: #fdecea; border-left: 4px solid #c62828; }
.charts { display: grid; grid-template-columns: repeat(auto-fit, minmax(480px, 1fr)); gap: 1rem; }
.charts svg { background: #fff; width: 100%; height: auto; }
.info-header { display: flex; justify-content: space-between; align-items: center; background: #fff; padding: .8rem 1rem; margin-bottom: 1rem; }
.info-header img.flag { height: 56px; }
.info-header .center { text-align: center; flex: 1; }
.legend span { display: inline-block; width: .9rem; height: .9rem; margin: 0 .3rem 0 .9rem; vertical-align: middle; }
footer { color: #777; font-size: .85rem; padding: 0 1.5rem 1rem; }
form.login { background: #fff; padding: 1.5rem; max-width: 320px; display: grid; gap: .7rem; }
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Home,
    Timeline,
    Statistics,
    Infographic,
}

impl Nav {
    const ALL: [Nav; 4] = [Nav::Home, Nav::Timeline, Nav::Statistics, Nav::Infographic];

    fn path(self) -> &'static str {
        match self {
            Nav::Home => "/",
            Nav::Timeline => "/timeline",
            Nav::Statistics => "/statistics",
            Nav::Infographic => "/infographic",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Nav::Home => "Home",
            Nav::Timeline => "Timeline",
            Nav::Statistics => "Statistics",
            Nav::Infographic => "Infographic",
        }
    }
}

/// What the shell needs besides the page body
pub struct PageContext<'a> {
    pub title: &'a str,
    pub active: Nav,
    pub username: &'a str,
    /// Carried in navigation links so the selection follows the user
    pub match_id: Option<&'a str>,
    /// e.g. data age
    pub footer: Option<String>,
}

fn document(title: &str, header: &str, body: &str, footer: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} - Futsal WC</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         {header}<main>\n{body}\n</main>\n{footer}</body>\n</html>\n",
        title = escape(title),
    )
}

pub fn page(ctx: &PageContext<'_>, body: &str) -> String {
    let query = ctx
        .match_id
        .map(|id| format!("?match={}", escape(id)))
        .unwrap_or_default();
    let links: String = Nav::ALL
        .iter()
        .map(|nav| {
            let class = if *nav == ctx.active { " class=\"active\"" } else { "" };
            format!("<a href=\"{}{}\"{}>{}</a>", nav.path(), query, class, nav.label())
        })
        .collect();

    let header = format!(
        "<header>\n<strong>FIFA Futsal World Cup</strong>\n<nav>{links}</nav>\n\
         <div class=\"user\">Signed in as: {user}\
         <form method=\"post\" action=\"/logout\"><button type=\"submit\">Logout</button></form></div>\n\
         </header>\n",
        links = links,
        user = escape(ctx.username),
    );
    let footer = ctx
        .footer
        .as_deref()
        .map(|f| format!("<footer>{}</footer>\n", escape(f)))
        .unwrap_or_default();

    document(ctx.title, &header, body, &footer)
}

pub fn login_page(error: Option<&str>) -> String {
    let error = error
        .map(|e| format!("<p class=\"error\">{}</p>\n", escape(e)))
        .unwrap_or_default();
    let body = format!(
        "<h1>Sign in</h1>\n{error}\
         <form class=\"login\" method=\"post\" action=\"/login\">\n\
         <label>Username <input name=\"username\" autocomplete=\"username\" required></label>\n\
         <label>Password <input name=\"password\" type=\"password\" autocomplete=\"current-password\" required></label>\n\
         <label><input name=\"remember\" type=\"checkbox\" value=\"on\" checked> Remember me</label>\n\
         <button type=\"submit\">Login</button>\n</form>",
    );
    document("Login", "", &body, "")
}

/// Standalone page for failures; the user recovers by reloading
pub fn error_page(heading: &str, detail: &str) -> String {
    let body = format!(
        "<h1>Something went wrong</h1>\n<div class=\"error\"><p><strong>{}</strong></p><p>{}</p></div>\n\
         <p><a href=\"\">Reload</a> or go back to <a href=\"/\">Home</a>.</p>",
        escape(heading),
        escape(detail),
    );
    document("Error", "", &body, "")
}

pub fn notice(text: &str) -> String {
    format!("<p class=\"notice\">{}</p>", escape(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_marks_active_link_and_escapes_user() {
        let ctx = PageContext {
            title: "Statistics",
            active: Nav::Statistics,
            username: "<admin>",
            match_id: Some("42"),
            footer: Some("Data fetched just now".to_string()),
        };
        let html = page(&ctx, "<p>body</p>");
        assert!(html.contains("<a href=\"/statistics?match=42\" class=\"active\">Statistics</a>"));
        assert!(html.contains("<a href=\"/?match=42\">Home</a>"));
        assert!(html.contains("Signed in as: &lt;admin&gt;"));
        assert!(html.contains("<footer>Data fetched just now</footer>"));
        assert!(html.contains("<p>body</p>"));
    }

    #[test]
    fn test_login_page_shows_error() {
        let html = login_page(Some("Invalid username or password"));
        assert!(html.contains("class=\"error\">Invalid username or password"));
        assert!(html.contains("name=\"remember\""));
        assert!(!login_page(None).contains("class=\"error\""));
    }

    #[test]
    fn test_error_page_mentions_reload() {
        let html = error_page("Could not load data", "Reload the page to try again.");
        assert!(html.contains("Reload the page to try again."));
        assert!(!html.contains("Logout"));
    }
}
