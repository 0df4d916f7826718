use maud::{DOCTYPE, Markup, PreEscaped, html};
use percent_encoding::utf8_percent_encode;

use crate::content::{
    Icon, JourneyEntry, Project, SkillGroup,
    forms::{Field, FieldKind},
};
use crate::portfolio::Category;
use crate::state::SiteConfig;
use crate::tabs::{KEY_ESCAPE, Tab};

/// Everything the page chrome needs.
pub struct Chrome<'a> {
    pub site: &'a SiteConfig,
    pub tabs: &'a [Tab],
    pub active: &'a str,
    pub is_admin: bool,
    pub flash: Option<&'a str>,
}

// ── Shared page shell ──────────────────────────────────────────────────────────

fn shell(chrome: &Chrome<'_>, title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | " (chrome.site.owner) }
                style { (PreEscaped(BASE_CSS)) }
            }
            body {
                header class="topbar" {
                    a class="brand" href="/" { "About - " (chrome.site.owner) }
                    nav class="tabs" {
                        @for tab in chrome.tabs {
                            a href=(tab.href) class=[(tab.href == chrome.active).then_some("active")] {
                                (tab.label)
                            }
                        }
                        @if chrome.is_admin {
                            a class="add-tab" href="/admin/tabs" title="Add Domain Tab" { "+" }
                        }
                    }
                }
                @if let Some(msg) = chrome.flash {
                    p class="flash" role="status" { (msg) }
                }
                main { (body) }
                form method="post" action="/admin/toggle" class="lock" {
                    button type="submit" title="Admin Login" {
                        @if chrome.is_admin { "🔓" } @else { "🔒" }
                    }
                }
            }
        }
    }
}

fn icon(icon: &Icon) -> Markup {
    match icon {
        Icon::Url { href } => html! { img class="icon" src=(href) alt=""; },
        Icon::Builtin { name } => html! { span class="icon" { (glyph(name)) } },
    }
}

fn glyph(name: &str) -> &str {
    match name {
        "briefcase" => "💼",
        "graduation" => "🎓",
        "target" => "🎯",
        "activity" => "📈",
        "users" => "👥",
        "line-chart" => "📊",
        "bot" => "🤖",
        "cpu" => "🧠",
        "database" => "🗄",
        "box" => "📦",
        "globe" => "🌐",
        "server" => "🖥",
        "terminal" => "⌨",
        "github" => "🐙",
        "code" => "</>",
        "sparkles" | "" => "✨",
        other => other,
    }
}

fn accent(color: &str) -> &'static str {
    match color {
        "red" => "#ef4444",
        "purple" => "#a855f7",
        "emerald" => "#10b981",
        "blue" => "#3b82f6",
        "orange" => "#f97316",
        "rose" => "#f43f5e",
        "yellow" => "#eab308",
        _ => "#06b6d4",
    }
}

fn admin_actions(edit_href: &str, delete_href: &str) -> Markup {
    html! {
        span class="actions" {
            a href=(edit_href) title="Edit" { "✎" }
            a href=(delete_href) class="danger" title="Delete" { "✕" }
        }
    }
}

fn tag_list(tags: &[String]) -> Markup {
    html! {
        @if !tags.is_empty() {
            ul class="tags" {
                @for t in tags { li { (t) } }
            }
        }
    }
}

// ── About ──────────────────────────────────────────────────────────────────────

pub struct AboutView<'a> {
    pub resume_href: &'a str,
    pub arsenal: &'a [SkillGroup],
    pub journey: &'a [JourneyEntry],
}

pub fn about_page(chrome: &Chrome<'_>, view: &AboutView<'_>) -> Markup {
    let admin = chrome.is_admin;
    shell(
        chrome,
        "About",
        html! {
            div class="about" {
                section class="panel arsenal" {
                    h3 {
                        "Technical Arsenal"
                        @if admin { a class="add" href="/admin/arsenal/new" title="Add" { "+" } }
                    }
                    @for group in view.arsenal {
                        div class="skill-group" {
                            h4 {
                                (icon(&group.icon)) (group.title)
                                @if admin {
                                    (admin_actions(
                                        &format!("/admin/arsenal/{}/edit", group.id),
                                        &format!("/admin/arsenal/{}/delete", group.id),
                                    ))
                                }
                            }
                            (tag_list(&group.skills))
                        }
                    }
                }
                section class="hero" {
                    h1 { "Hello." br; "I'm " span class="grad" { (chrome.site.owner) "." } }
                }
                section class="panel reach" {
                    h3 { "How to reach" }
                    h4 {
                        "Curriculum Vitae"
                        @if admin { a class="add" href="/admin/resume" title="Edit" { "✎" } }
                    }
                    p { "My complete professional timeline and detailed resume can be found here." }
                    a class="cta" href=(view.resume_href) target="_blank" rel="noopener noreferrer" {
                        "View Resume"
                    }
                }
                section class="panel journey" {
                    h3 {
                        "Professional Journey"
                        @if admin { a class="add" href="/admin/journey/new" title="Add" { "+" } }
                    }
                    ol class="timeline" {
                        @for entry in view.journey {
                            li style={ "border-color: " (accent(&entry.color)) } {
                                (icon(&entry.icon))
                                strong { (entry.role) }
                                span class="period" { (entry.period) }
                                p class="company" { (entry.company) }
                                p { (entry.description) }
                                @if admin {
                                    (admin_actions(
                                        &format!("/admin/journey/{}/edit", entry.id),
                                        &format!("/admin/journey/{}/delete", entry.id),
                                    ))
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

// ── Category ───────────────────────────────────────────────────────────────────

pub fn category_page(chrome: &Chrome<'_>, category: &Category, projects: &[Project]) -> Markup {
    let admin = chrome.is_admin;
    let scope = utf8_percent_encode(&category.storage_key, KEY_ESCAPE).to_string();
    shell(
        chrome,
        &category.title,
        html! {
            section class="category" style={ "--accent: " (accent(&category.color_theme)) } {
                header {
                    (icon(&category.icon))
                    h1 { (category.title) }
                    p { (category.description) }
                }
                @if !category.concepts.is_empty() {
                    ul class="concepts" {
                        @for c in &category.concepts {
                            li title=(c.desc) { (icon(&c.icon)) (c.title) }
                        }
                    }
                }
                h2 {
                    "Featured Projects"
                    @if admin {
                        a class="add" href={ "/admin/projects/new?category=" (scope) } { "+ Add Project" }
                    }
                }
                @if projects.is_empty() {
                    p class="empty" { "No projects added yet." }
                }
                @for p in projects {
                    article class="project" {
                        h3 {
                            (p.title)
                            @if !p.tag.is_empty() { span class="tag" { (p.tag) } }
                            @if admin {
                                (admin_actions(
                                    &format!("/admin/projects/{}/edit?category={}", p.id, scope),
                                    &format!("/admin/projects/{}/delete?category={}", p.id, scope),
                                ))
                            }
                        }
                        p { (p.desc) }
                        (tag_list(&p.tags))
                        @if !p.link.is_empty() {
                            a href=(p.link) target="_blank" rel="noreferrer" { "View project ↗" }
                        }
                    }
                }
            }
        },
    )
}

// ── Admin forms ────────────────────────────────────────────────────────────────

fn field(f: &Field) -> Markup {
    html! {
        @match &f.kind {
            FieldKind::Text => {
                input type="text" name=(f.name) placeholder=(f.placeholder) value=(f.value);
            }
            FieldKind::TextArea => {
                textarea name=(f.name) placeholder=(f.placeholder) rows="3" { (f.value) }
            }
            FieldKind::Select(options) => {
                select name=(f.name) {
                    @for opt in *options {
                        option value=(opt) selected[*opt == f.value] { (opt) }
                    }
                }
            }
        }
    }
}

/// A generic edit form posting `fields` to `action`.
pub fn form_page(
    chrome: &Chrome<'_>,
    heading: &str,
    action: &str,
    fields: &[Field],
    cancel_href: &str,
) -> Markup {
    shell(
        chrome,
        heading,
        html! {
            section class="panel editor" {
                h2 { (heading) }
                form method="post" action=(action) {
                    @for f in fields { (field(f)) }
                    div class="buttons" {
                        button type="submit" { "Save" }
                        a href=(cancel_href) { "Cancel" }
                    }
                }
            }
        },
    )
}

pub fn confirm_delete_page(
    chrome: &Chrome<'_>,
    noun: &str,
    label: &str,
    action: &str,
    cancel_href: &str,
) -> Markup {
    shell(
        chrome,
        "Confirm delete",
        html! {
            section class="panel editor" {
                h2 { "Delete this " (noun) "?" }
                p { strong { (label) } }
                form method="post" action=(action) class="buttons" {
                    button type="submit" name="decision" value="confirm" class="danger" { "Delete" }
                    button type="submit" name="decision" value="cancel" { "Keep" }
                }
                p { a href=(cancel_href) { "Back" } }
            }
        },
    )
}

// ── Login ──────────────────────────────────────────────────────────────────────

pub fn login_page(site: &SiteConfig, error: Option<&str>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Admin Access | " (site.owner) }
                style { (PreEscaped(BASE_CSS)) }
                @if site.google_client_id.is_some() {
                    script src="https://accounts.google.com/gsi/client" async {}
                }
            }
            body {
                div class="panel login" {
                    a class="close" href="/admin/login/cancel" title="Close" { "✕" }
                    h3 { "Admin Access" }
                    p { "Connect your Google account to unlock inline portfolio editing capabilities." }
                    @if let Some(err) = error {
                        p class="error" role="alert" { (err) }
                    }
                    @if let Some(client_id) = &site.google_client_id {
                        div id="g_id_onload"
                            data-client_id=(client_id)
                            data-login_uri="/admin/login"
                            data-ux_mode="redirect"
                            data-auto_prompt="false" {}
                        div class="g_id_signin" data-type="standard" data-shape="pill" {}
                    } @else {
                        p class="error" { "Sign-in is not configured on this server." }
                    }
                }
            }
        }
    }
}

const BASE_CSS: &str = r#"
*, *::before, *::after { box-sizing: border-box; }
:root {
  --bg: #f7f5f0; --panel: #ffffffcc; --text: #1f2937; --muted: #6b7280;
  --accent: #06b6d4; --danger: #e05555; --border: rgba(0,0,0,.08);
}
body { margin: 0; font-family: system-ui, sans-serif; background: var(--bg); color: var(--text); }
a { color: inherit; }
.topbar { position: sticky; top: 0; display: flex; gap: 1rem; align-items: center; padding: 1rem 1.5rem; backdrop-filter: blur(12px); }
.brand { font-weight: 700; text-decoration: none; }
.tabs { display: flex; gap: .25rem; overflow-x: auto; }
.tabs a { padding: .4rem .9rem; border-radius: 999px; text-decoration: none; white-space: nowrap; }
.tabs a.active { background: var(--text); color: var(--bg); }
.add-tab { color: var(--accent); font-weight: 900; }
main { max-width: 72rem; margin: 0 auto; padding: 2rem 1.5rem 6rem; }
.flash { max-width: 72rem; margin: 1rem auto 0; padding: .75rem 1.5rem; background: #ecfeff; border-radius: 12px; }
.panel { background: var(--panel); border: 1px solid var(--border); border-radius: 1.5rem; padding: 1.5rem; }
.about { display: grid; gap: 2rem; grid-template-columns: repeat(auto-fit, minmax(18rem, 1fr)); }
.hero h1 { font-size: 3.5rem; line-height: 1.1; }
.grad { background: linear-gradient(90deg, #06b6d4, #9333ea); -webkit-background-clip: text; color: transparent; }
.journey { grid-column: 1 / -1; }
.timeline { list-style: none; padding: 0; display: grid; gap: 1rem; grid-template-columns: repeat(auto-fit, minmax(14rem, 1fr)); }
.timeline li { border-left: 4px solid; padding-left: 1rem; }
.period, .company { color: var(--muted); font-size: .85rem; }
.icon { display: inline-block; width: 1.5rem; height: 1.5rem; margin-right: .4rem; vertical-align: middle; }
.tags, .concepts { list-style: none; padding: 0; display: flex; flex-wrap: wrap; gap: .4rem; }
.tags li, .concepts li { padding: .15rem .6rem; border-radius: 999px; border: 1px solid var(--border); font-size: .8rem; }
.category header h1 { margin: .5rem 0; }
.project { border-left: 4px solid var(--accent); padding: 1rem 1.25rem; margin: 1rem 0; background: var(--panel); border-radius: 1rem; }
.tag { margin-left: .5rem; font-size: .75rem; color: var(--accent); }
.actions { margin-left: .5rem; display: inline-flex; gap: .4rem; }
.actions a, .add { text-decoration: none; margin-left: .5rem; color: var(--accent); }
.danger { color: var(--danger); }
.cta { display: block; text-align: center; padding: .75rem; border-radius: .75rem; color: #fff; text-decoration: none; background: linear-gradient(90deg, #06b6d4, #9333ea); }
.editor form { display: grid; gap: .75rem; }
.editor input, .editor textarea, .editor select { padding: .6rem; border-radius: .6rem; border: 1px solid var(--border); font: inherit; }
.buttons { display: flex; gap: .75rem; align-items: center; }
.login { max-width: 24rem; margin: 12vh auto 0; position: relative; text-align: center; }
.login .close { position: absolute; top: 1rem; right: 1rem; text-decoration: none; }
.error { color: var(--danger); }
.lock { position: fixed; bottom: 1.5rem; left: 1.5rem; }
.lock button { border: none; border-radius: 999px; padding: .75rem; cursor: pointer; background: var(--panel); }
"#;
