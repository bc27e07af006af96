//! Server-rendered HTML: the catalog listing, one page per game and the
//! not-found page. The game page only carries markup and the descriptor;
//! the wasm client mounts the player into it.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use arcade_core::catalog::{Catalog, GameDescriptor};
use arcade_core::page;
use arcade_core::time::current_year;

use crate::config::SiteConfig;
use crate::state::AppState;

const STYLE: &str = r#"
*{box-sizing:border-box}
body{margin:0;min-height:100vh;display:flex;flex-direction:column;font-family:system-ui,sans-serif;background:#334155;color:#fff;-webkit-font-smoothing:antialiased}
nav{display:flex;align-items:center;justify-content:flex-end;height:2.5rem;padding:0 1rem;background:#334155;font-size:.875rem}
nav a{margin-right:1.5rem;color:#020617;text-decoration:none;font-size:1.5rem}
nav a.current{pointer-events:none;opacity:.5}
.logo{display:flex;align-items:center;justify-content:center;background:#475569;padding:.5rem}
.logo img{width:4rem;margin:0 .5rem}
.logo h1{margin:0;padding:0 .25rem;font-size:1.25rem;font-weight:400;color:#020617;white-space:nowrap}
main{flex-grow:1;display:flex;flex-direction:column;background:#334155}
footer{margin-top:auto;display:flex;align-items:center;justify-content:center;height:2.5rem;background:#1e293b;color:#64748b;font-size:.875rem}
.listing{display:flex;flex:1;justify-content:center;padding:4rem 1rem}
.grid{display:grid;width:100%;gap:2rem;grid-template-columns:repeat(auto-fit,360px);justify-content:center}
.card{display:flex;flex-direction:column}
.card a{position:relative;display:block;width:360px;aspect-ratio:16/9;overflow:hidden;border-radius:.5rem;box-shadow:0 10px 15px rgba(0,0,0,.3);transition:transform .2s}
.card a:hover{transform:scale(1.05)}
.card img{width:100%;height:100%;object-fit:cover}
.card .play{position:absolute;inset:0;display:flex;align-items:center;justify-content:center;background:rgba(0,0,0,.4);opacity:0;transition:opacity .2s}
.card a:hover .play{opacity:1}
.card .play span{border-radius:9999px;background:rgba(255,255,255,.9);padding:0 1rem;font-size:1.125rem;color:#1e293b}
.card p{margin:.5rem 0 0;text-align:center}
.stage{display:flex;flex:1;flex-direction:column;align-items:center;justify-content:center;padding:.5rem 1rem}
.player{display:flex;flex-direction:column}
#player-container{position:relative;overflow:hidden}
#player-container.fullscreen{display:flex;align-items:center;justify-content:center;background:#000}
.overlay{position:absolute;inset:0;z-index:10;display:flex;flex-direction:column;align-items:center;justify-content:center;background:#1e293b}
.overlay[hidden]{display:none}
.overlay p{margin:0 0 .5rem;font-size:.875rem}
.bar{height:.5rem;width:8rem;overflow:hidden;border-radius:9999px;background:#475569}
.bar div{height:100%;width:0;background:#3b82f6;transition:width .2s}
#player-error-message{color:#f87171}
#unity-canvas{display:block;background:#000}
.controls{position:relative;margin-top:.25rem;display:flex;align-items:center;justify-content:center}
.controls p{margin:0;font-size:.875rem}
.controls button{position:absolute;right:0;border:0;background:none;color:#fff;cursor:pointer;font-size:1.25rem}
.controls button:hover{opacity:.8}
.missing{flex:1;display:flex;flex-direction:column;align-items:center;justify-content:center}
.missing a{color:#93c5fd}
@media(min-width:768px){
nav{height:5rem;padding:0 2rem;font-size:1.125rem}
nav a{font-size:2rem}
.logo{padding:1rem}
.logo img{width:6rem;margin:0 1rem}
.logo h1{font-size:1.875rem;padding:0 .5rem}
footer{height:5rem;font-size:1rem}
.listing{padding:4rem 2rem}
.stage{padding:1rem}
.overlay p{font-size:1rem}
.bar{width:12rem}
.controls p{font-size:1.125rem}
}
@media(min-width:1024px){
.logo{padding:1.5rem}
.logo img{width:8rem}
.logo h1{font-size:2.25rem}
}
"#;

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an absolute path for use in `href`/`src`, keeping `/` intact.
fn escape_url_path(path: &str) -> String {
    escape_html(&path.replace(' ', "%20"))
}

/// Serialize a descriptor for embedding inside a `<script>` element.
fn descriptor_json(game: &GameDescriptor) -> String {
    serde_json::to_string(game)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

fn document(site: &SiteConfig, title: &str, description: &str, body: &str, head: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
<meta name="keywords" content="{keywords}">
<meta name="author" content="{author}">
<link rel="icon" href="{icon}">
<link rel="apple-touch-icon" href="{icon}">
<style>{STYLE}</style>
{head}</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        description = escape_html(description),
        keywords = escape_html(&site.keywords.join(", ")),
        author = escape_html(&site.title),
        icon = escape_url_path(&site.icon),
    )
}

/// Navigation bar, logo banner and footer around `main`.
fn chrome(site: &SiteConfig, is_home: bool, main: &str) -> String {
    let home_class = if is_home { r#" class="current""# } else { "" };
    let name = escape_html(&site.title);
    format!(
        r#"<nav><a href="/"{home_class} title="Home" aria-label="Home">&#8962;</a></nav>
<div class="logo">
<img src="{dark}" alt="{name} Logo Black" width="128" height="128">
<h1>{name}</h1>
<img src="{light}" alt="{name} Logo Blue" width="128" height="128">
</div>
<main>
{main}
</main>
<footer><p>&copy; {year} {name}</p></footer>"#,
        dark = escape_url_path(&site.logo_dark),
        light = escape_url_path(&site.logo_light),
        year = current_year(),
    )
}

pub fn render_home(site: &SiteConfig, catalog: &Catalog) -> String {
    let cards: String = catalog
        .iter()
        .map(|game| {
            let name = escape_html(&game.name);
            format!(
                r#"<div class="card">
<a href="{href}"><img src="{thumb}" alt="{name}"><div class="play"><span>&#9654; Play</span></div></a>
<p>{name}</p>
</div>
"#,
                href = escape_url_path(&page::game_href(&game.id.0)),
                thumb = escape_url_path(&game.thumbnail),
            )
        })
        .collect();
    let main = format!(r#"<div class="listing"><div class="grid">{cards}</div></div>"#);
    document(
        site,
        &site.title,
        &site.description,
        &chrome(site, true, &main),
        "",
    )
}

pub fn render_game(site: &SiteConfig, game: &GameDescriptor) -> String {
    let dims = game.bounds().initial_dimensions();
    let name = escape_html(&game.name);
    let main = format!(
        r#"<div class="stage">
<div class="player">
<div id="{container}" style="width:{w}px;height:{h}px">
<div id="{loading}" class="overlay"><p id="{label}">{loading_text}</p><div class="bar"><div id="{bar}"></div></div></div>
<div id="{error}" class="overlay" hidden><p id="{error_msg}"></p></div>
<canvas id="{canvas}" width="{w}" height="{h}" style="width:{w}px;height:{h}px;margin-top:{margin}px"></canvas>
</div>
<div class="controls"><p>{name}</p><button id="{button}" type="button" title="{title}">&#x26F6;</button></div>
</div>
</div>
<script type="application/json" id="{descriptor_id}">{json}</script>"#,
        container = page::CONTAINER_ID,
        loading = page::LOADING_ID,
        label = page::LOADING_LABEL_ID,
        loading_text = escape_html(&page::loading_label(&game.name, 0)),
        bar = page::PROGRESS_BAR_ID,
        error = page::ERROR_ID,
        error_msg = page::ERROR_MESSAGE_ID,
        canvas = page::CANVAS_ID,
        w = dims.width,
        h = dims.height,
        margin = page::canvas_margin_top(false),
        button = page::FULLSCREEN_BUTTON_ID,
        title = page::fullscreen_button_title(false),
        descriptor_id = page::DESCRIPTOR_ID,
        json = descriptor_json(game),
    );
    let head = format!(
        r#"<script type="module">import init from "{module}"; init();</script>
"#,
        module = page::CLIENT_MODULE,
    );
    document(
        site,
        &format!("{} | {}", site.title, game.name),
        &game.description,
        &chrome(site, false, &main),
        &head,
    )
}

pub fn render_not_found(site: &SiteConfig) -> String {
    let main = r#"<div class="missing"><h2>Game Not Found</h2><p><a href="/">Back to all games</a></p></div>"#;
    document(
        site,
        "Game Not Found",
        &site.description,
        &chrome(site, false, main),
        "",
    )
}

/// `GET /`: catalog listing.
pub async fn home(State(state): State<AppState>) -> Html<String> {
    Html(render_home(&state.config.site, &state.catalog))
}

/// `GET /games/{game_id}`: one game, or the not-found page.
pub async fn game(State(state): State<AppState>, Path(game_id): Path<String>) -> Response {
    match state.catalog.get(&game_id) {
        Some(game) => Html(render_game(&state.config.site, game)).into_response(),
        None => {
            tracing::debug!(game_id = %game_id, "unknown game requested");
            not_found_response(&state.config.site)
        },
    }
}

/// Fallback for paths that match neither a route nor a static file.
pub async fn not_found(State(state): State<AppState>) -> Response {
    not_found_response(&state.config.site)
}

fn not_found_response(site: &SiteConfig) -> Response {
    (StatusCode::NOT_FOUND, Html(render_not_found(site))).into_response()
}
