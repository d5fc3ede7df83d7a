use crate::calendar::{
    activity_bars, bucket_by_date, build_calendar_grid_at, counts_for_month, YearMonth,
};
use crate::models::{CalendarCell, Deal};
use crate::route::{Route, Theme};
use chrono::{Datelike, Local, NaiveDate};
use std::fmt::Write;

const HOME_CARD_LIMIT: usize = 6;
const SKELETON_CARDS: usize = 3;
const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn render_home(deals: &[Deal], theme: Theme) -> String {
    let mut cards = String::new();
    for deal in deals.iter().take(HOME_CARD_LIMIT) {
        let _ = write!(
            cards,
            r#"<a class="card" href="{href}">
          <img src="{image}" alt="{name}" />
          <div class="card-body">
            <div class="card-title"><h3>{name}</h3><span class="badge">-{discount}</span></div>
            <p class="muted">by {brand}</p>
          </div>
        </a>"#,
            href = link(Route::PluginDetail(deal.id), theme),
            image = escape(&deal.image),
            name = escape(&deal.name),
            discount = escape(&deal.discount),
            brand = escape(&deal.brand),
        );
    }
    if deals.is_empty() {
        cards.push_str(r#"<p class="muted">No deals right now. Check back later.</p>"#);
    }

    let content = format!(r#"{HERO}<section class="grid">{cards}</section>"#);
    render_layout(Route::Home, theme, &link(Route::Home, theme.toggled()), &content, "")
}

pub fn render_loading(route: Route, theme: Theme) -> String {
    let card = r#"<div class="card skeleton"><div class="skeleton-image"></div><div class="card-body"><div class="bar wide"></div><div class="bar"></div></div></div>"#;
    let content = format!(
        r#"{HERO}<section class="grid" aria-busy="true">{}</section>"#,
        card.repeat(SKELETON_CARDS)
    );
    render_layout(
        route,
        theme,
        &link(route, theme.toggled()),
        &content,
        r#"<meta http-equiv="refresh" content="2" />"#,
    )
}

pub fn render_failed(route: Route, theme: Theme, message: &str) -> String {
    let content = format!(
        r#"<section class="notice error">
      <h3>Could not load deals</h3>
      <p class="muted">{}</p>
      <p class="muted">The deals service did not answer with a usable list. Restart the tracker to try again.</p>
    </section>"#,
        escape(message)
    );
    render_layout(route, theme, &link(route, theme.toggled()), &content, "")
}

pub fn render_plugin(deal: &Deal, theme: Theme) -> String {
    let route = Route::PluginDetail(deal.id);
    let content = format!(
        r#"<article class="detail">
      <img src="{image}" alt="{name}" />
      <div class="detail-body">
        <h2>{name}</h2>
        <p class="muted">by {brand}</p>
        <div class="detail-prices">
          <div>
            <span class="strike">{original}</span>
            <span class="sale">{sale}</span>
            <span class="badge">-{discount}</span>
          </div>
          <button class="primary" type="button">Get This Deal</button>
        </div>
        <p><a href="{home}">&larr; All deals</a></p>
      </div>
    </article>"#,
        image = escape(&deal.image),
        name = escape(&deal.name),
        brand = escape(&deal.brand),
        original = escape(&deal.original_price),
        sale = escape(&deal.sale_price),
        discount = escape(&deal.discount),
        home = link(Route::Home, theme),
    );
    render_layout(route, theme, &link(route, theme.toggled()), &content, "")
}

pub fn render_not_found(id: i64, theme: Theme) -> String {
    let route = Route::PluginDetail(id);
    let content = format!(
        r#"<section class="notice">
      <h3>Plugin Not Found</h3>
      <p class="muted">The requested plugin does not exist or was removed.</p>
      <a class="primary" href="{}">Back to Home</a>
    </section>"#,
        link(Route::Home, theme)
    );
    render_layout(route, theme, &link(route, theme.toggled()), &content, "")
}

pub fn render_calendar(deals: &[Deal], month: YearMonth, theme: Theme) -> String {
    render_calendar_at(deals, month, theme, Local::now().date_naive())
}

pub fn render_calendar_at(deals: &[Deal], month: YearMonth, theme: Theme, today: NaiveDate) -> String {
    let buckets = bucket_by_date(deals);
    let counts = counts_for_month(&buckets, month);
    let cells = build_calendar_grid_at(&buckets, month, today);

    let mut bars = String::new();
    let mut bar_labels = String::new();
    for bar in activity_bars(&counts) {
        let _ = write!(
            bars,
            r#"<div class="bar-slot" title="{day}: {count}"><div class="activity {class}" style="height: {height:.1}%"></div></div>"#,
            day = bar.day,
            count = bar.count,
            class = bar.level.css_class(),
            height = bar.height_percent,
        );
        if bar.day % 5 == 0 {
            let _ = write!(bar_labels, "<span>{}</span>", bar.day);
        }
    }

    let mut grid = String::new();
    for name in WEEKDAYS {
        let _ = write!(grid, r#"<div class="weekday">{name}</div>"#);
    }
    for cell in &cells {
        grid.push_str(&render_cell(cell));
    }

    let undated = if buckets.undated.is_empty() {
        String::new()
    } else {
        format!(
            r#"<p class="muted">{} deal(s) have no update date and are not shown on the calendar.</p>"#,
            buckets.undated.len()
        )
    };

    let content = format!(
        r#"<section class="calendar">
      <h2>Deal calendar</h2>
      <div class="switcher">
        <a class="round" href="{prev}" aria-label="Previous month">&lsaquo;</a>
        <h3>{label}</h3>
        <a class="round" href="{next}" aria-label="Next month">&rsaquo;</a>
      </div>
      <h4>Deal activity</h4>
      <div class="bars">{bars}</div>
      <div class="bar-labels">{bar_labels}</div>
      <div class="month-grid">{grid}</div>
      {undated}
    </section>"#,
        prev = calendar_link(month.previous(), theme),
        next = calendar_link(month.next(), theme),
        label = month.label(),
    );
    render_layout(
        Route::Calendar,
        theme,
        &calendar_link(month, theme.toggled()),
        &content,
        "",
    )
}

fn render_cell(cell: &CalendarCell) -> String {
    let class = if cell.is_valid_and_past {
        cell.intensity_bucket.css_class()
    } else {
        "padding"
    };
    let mut body = format!(r#"<span class="day">{}</span>"#, cell.day_of_month);
    if !cell.deals.is_empty() {
        let names = cell
            .deals
            .iter()
            .map(|deal| escape(&deal.name))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(
            body,
            r#"<span class="count">{} deals</span><div class="tooltip">{names}</div>"#,
            cell.deals.len()
        );
    }
    format!(r#"<div class="cell {class}" data-date="{}">{body}</div>"#, cell.date_key)
}

pub fn link(route: Route, theme: Theme) -> String {
    match theme {
        Theme::Dark => route.path(),
        Theme::Light => format!("{}?theme=light", route.path()),
    }
}

pub fn calendar_link(month: YearMonth, theme: Theme) -> String {
    format!(
        "{}?year={}&amp;month={}&amp;theme={}",
        Route::Calendar.path(),
        month.year,
        month.month,
        theme.as_str()
    )
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn render_layout(route: Route, theme: Theme, toggle_href: &str, content: &str, head_extra: &str) -> String {
    let title = match route {
        Route::Home => "PluginDeals Tracker".to_string(),
        Route::Calendar => "Deal calendar | PluginDeals Tracker".to_string(),
        Route::PluginDetail(id) => format!("Plugin {id} | PluginDeals Tracker"),
    };
    let toggle_label = match theme {
        Theme::Dark => "Light mode",
        Theme::Light => "Dark mode",
    };
    let calendar_class = if route == Route::Calendar { "nav active" } else { "nav" };

    LAYOUT_HTML
        .replace("{{TITLE}}", &title)
        .replace("{{HEAD_EXTRA}}", head_extra)
        .replace("{{THEME}}", theme.as_str())
        .replace("{{HOME_HREF}}", &link(Route::Home, theme))
        .replace("{{TOGGLE_HREF}}", toggle_href)
        .replace("{{TOGGLE_LABEL}}", toggle_label)
        .replace("{{CALENDAR_HREF}}", &link(Route::Calendar, theme))
        .replace("{{CALENDAR_CLASS}}", calendar_class)
        .replace("{{YEAR}}", &Local::now().year().to_string())
        .replace("{{CONTENT}}", content)
}

const HERO: &str = r#"<section class="hero">
      <h2>Track the Best Audio Plugin Deals</h2>
      <p class="muted">Stay updated with the latest discounts on premium audio plugins from top brands.</p>
    </section>"#;

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  {{HEAD_EXTRA}}
  <title>{{TITLE}}</title>
  <style>
    .theme-dark {
      --bg: #111827;
      --surface: #1f2937;
      --header: #000000;
      --ink: #f9fafb;
      --muted: #9ca3af;
      --empty: #374151;
    }

    .theme-light {
      --bg: #f3f4f6;
      --surface: #ffffff;
      --header: #ffffff;
      --ink: #111827;
      --muted: #4b5563;
      --empty: #e5e7eb;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      transition: background 300ms ease, color 300ms ease;
    }

    a {
      color: inherit;
    }

    header {
      position: sticky;
      top: 0;
      z-index: 10;
      background: var(--header);
      box-shadow: 0 6px 18px rgba(0, 0, 0, 0.25);
    }

    .container {
      width: min(1100px, 100%);
      margin: 0 auto;
      padding: 0 16px;
    }

    .topbar {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 16px 0;
    }

    .brand {
      font-size: 1.8rem;
      font-weight: 800;
      text-decoration: none;
      background: linear-gradient(90deg, #c084fc, #db2777);
      -webkit-background-clip: text;
      background-clip: text;
      color: transparent;
    }

    .nav {
      padding: 8px 16px;
      border-radius: 6px;
      background: var(--empty);
      text-decoration: none;
      margin-left: 8px;
    }

    .nav.active,
    .primary {
      background: #9333ea;
      color: white;
      border: none;
      border-radius: 999px;
      padding: 10px 22px;
      text-decoration: none;
      cursor: pointer;
    }

    main {
      padding-bottom: 64px;
    }

    .muted {
      color: var(--muted);
    }

    .hero {
      text-align: center;
      padding: 56px 0;
    }

    .hero h2 {
      font-size: clamp(1.8rem, 4vw, 3rem);
      margin: 0 0 16px;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
      gap: 32px;
    }

    .card {
      display: block;
      border-radius: 14px;
      overflow: hidden;
      background: var(--surface);
      text-decoration: none;
      box-shadow: 0 10px 24px rgba(0, 0, 0, 0.2);
      transition: transform 300ms ease;
    }

    .card:hover {
      transform: translateY(-4px);
    }

    .card img,
    .skeleton-image {
      width: 100%;
      height: 190px;
      object-fit: cover;
      background: var(--empty);
    }

    .card-body {
      padding: 22px;
    }

    .card-title {
      display: flex;
      justify-content: space-between;
      align-items: flex-start;
      gap: 8px;
    }

    .card-title h3 {
      margin: 0;
    }

    .badge {
      background: #16a34a;
      color: white;
      font-size: 0.75rem;
      font-weight: 600;
      padding: 4px 8px;
      border-radius: 999px;
    }

    .skeleton {
      animation: pulse 1.4s ease-in-out infinite;
    }

    .skeleton .bar {
      height: 16px;
      width: 30%;
      margin-bottom: 12px;
      border-radius: 4px;
      background: var(--empty);
    }

    .skeleton .bar.wide {
      width: 75%;
    }

    .notice {
      text-align: center;
      padding: 64px 0;
    }

    .notice.error h3 {
      color: #dc2626;
    }

    .detail {
      max-width: 900px;
      margin: 40px auto 0;
      border-radius: 14px;
      overflow: hidden;
      background: var(--surface);
    }

    .detail img {
      width: 100%;
      height: 260px;
      object-fit: cover;
    }

    .detail-body {
      padding: 32px;
    }

    .detail-prices {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .strike {
      text-decoration: line-through;
      color: var(--muted);
      margin-right: 8px;
    }

    .sale {
      font-size: 1.5rem;
      font-weight: 700;
      color: #c084fc;
      margin-right: 8px;
    }

    .calendar {
      max-width: 900px;
      margin: 0 auto;
    }

    .calendar h2 {
      text-align: center;
      margin: 40px 0 32px;
    }

    .switcher {
      display: flex;
      justify-content: space-between;
      align-items: center;
      margin-bottom: 32px;
    }

    .round {
      font-size: 1.6rem;
      text-decoration: none;
      padding: 4px 14px;
      border-radius: 999px;
    }

    .round:hover {
      background: var(--empty);
    }

    .bars {
      display: flex;
      gap: 4px;
      height: 80px;
    }

    .bar-slot {
      flex: 1;
      display: flex;
      flex-direction: column;
      justify-content: flex-end;
    }

    .activity {
      width: 100%;
      border-radius: 2px 2px 0 0;
    }

    .bar-labels {
      display: flex;
      justify-content: space-between;
      font-size: 0.75rem;
      color: var(--muted);
      margin: 8px 0 40px;
    }

    .month-grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 8px;
      text-align: center;
    }

    .weekday {
      padding: 8px;
      color: var(--muted);
      font-weight: 600;
    }

    .cell {
      aspect-ratio: 1;
      display: flex;
      flex-direction: column;
      justify-content: center;
      align-items: center;
      border-radius: 6px;
      position: relative;
    }

    .cell .count {
      font-size: 0.75rem;
      margin-top: 4px;
    }

    .cell .tooltip {
      display: none;
      position: absolute;
      bottom: 100%;
      left: 50%;
      transform: translateX(-50%);
      margin-bottom: 6px;
      background: #111827;
      color: white;
      font-size: 0.75rem;
      padding: 4px 8px;
      border-radius: 4px;
      white-space: nowrap;
      z-index: 5;
    }

    .cell:hover .tooltip {
      display: block;
    }

    .padding {
      background: #1f2937;
      opacity: 0.3;
    }

    .heat-none {
      background: var(--empty);
    }

    .heat-low {
      background: #eab308;
    }

    .heat-medium {
      background: #f97316;
    }

    .heat-high {
      background: #dc2626;
    }

    footer {
      border-top: 1px solid var(--empty);
      padding: 24px 0;
      text-align: center;
      color: #6b7280;
    }

    @keyframes pulse {
      50% {
        opacity: 0.5;
      }
    }
  </style>
</head>
<body class="theme-{{THEME}}">
  <header>
    <div class="container topbar">
      <a class="brand" href="{{HOME_HREF}}">PluginDeals Tracker</a>
      <nav>
        <a class="nav" href="{{TOGGLE_HREF}}">{{TOGGLE_LABEL}}</a>
        <a class="{{CALENDAR_CLASS}}" href="{{CALENDAR_HREF}}">Calendar</a>
      </nav>
    </div>
  </header>

  <main class="container">
    {{CONTENT}}
  </main>

  <footer>
    <p>&copy; {{YEAR}} PluginDeals Tracker. All rights reserved.</p>
  </footer>

  <script>
    if (window.location.hash.length > 1) {
      const params = new URLSearchParams({ to: window.location.hash.slice(1), theme: '{{THEME}}' });
      window.location.replace('/nav?' + params.toString());
    }
  </script>
</body>
</html>
"#;
